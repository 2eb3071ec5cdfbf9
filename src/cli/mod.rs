pub mod history;
pub mod plan;
pub mod run;
pub mod setup;
pub mod ui;
