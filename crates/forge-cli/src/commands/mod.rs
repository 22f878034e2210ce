pub mod ask;
pub mod dispatch;
pub mod facts;
pub mod generate;
pub mod inspect;
pub mod name;
pub mod query;
