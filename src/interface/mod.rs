pub mod prompts;
pub mod render;

pub use prompts::{prompt_item_id, prompt_price, prompt_quantity, prompt_yes_no};
pub use render::{
    display_breakdown, display_cost_result, display_item_list, display_price_hints, format_cost,
};
