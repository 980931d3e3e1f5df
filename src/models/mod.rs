//! Data models for the estimating engine.

mod line_item;
mod parse;
mod pricing;
mod question;
mod task;

pub use line_item::LineItem;
pub use parse::{PageMapEntry, ParseResult, ParsedPage};
pub use pricing::{PriceRequest, PriceResult, PricingSource, SourceMeta};
pub use question::{AnswerType, AnswerValue, Expected, Question, QuestionScope};
pub use task::{ExtractedTask, SourceRef, TradeRule};
