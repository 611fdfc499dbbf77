use color_eyre::Result;
use iced::{Element, Task};
use std::fmt;

mod error_modal;
mod portrait;
pub use error_modal::ErrorModal;
pub use portrait::Portrait;

use crate::{
    context::Context,
    message::{Message, UiMessage},
};

pub trait State: fmt::Debug {
    fn update(&mut self, event: UiMessage, ctx: &mut Context) -> Result<StateCommand>;
    fn view<'a>(&'a self, ctx: &'a Context) -> Element<'a, UiMessage>;
    fn clone(&self) -> Box<dyn State>;
}

/// What the gui does after a state handled a message
#[derive(Debug, Default)]
pub struct StateCommand {
    pub task: Option<Task<Message>>,
    pub transition: Option<Box<dyn State>>,
}

pub mod cmd {
    use super::*;

    pub fn none() -> Result<StateCommand> {
        Ok(StateCommand::default())
    }

    pub fn task(t: Task<Message>) -> Result<StateCommand> {
        Ok(StateCommand {
            task: Some(t),
            transition: None,
        })
    }
}
