use std::fmt;

use color_eyre::{Result, eyre::WrapErr as _};
use engine::Config;
use iced::{
    Element, Event, Font, Length, Subscription, Task, event,
    font::{self},
    padding,
    widget::{container, scrollable, text},
    window,
};

use crate::{
    message::{Message, ui_messages::Portrait as PortraitMessage},
    state::{ErrorModal, State},
};

pub mod cli;
pub mod context;
pub mod message;
pub mod state;

pub use context::Context;

pub const APP_NAME: &str = "Little Portrait AI";

pub struct Gui {
    state: Box<dyn State>,
    ctx: Context,
}

impl Gui {
    pub fn new(config: Config) -> Self {
        Gui {
            state: Box::new(state::Portrait),
            ctx: Context::from_config(config),
        }
    }

    pub fn update(&mut self, message: Message) -> Task<Message> {
        match self.try_update(message) {
            Ok(task) => task,
            Err(e) => {
                log::error!("{e:?}");
                self.state = Box::new(ErrorModal::new(
                    self.state.clone(),
                    "Error",
                    &format!("{e:?}"),
                ));
                Task::none()
            }
        }
    }

    fn try_update(&mut self, message: Message) -> Result<Task<Message>> {
        match message {
            Message::Ui(ui_message) => {
                let cmd = self.state.update(ui_message, &mut self.ctx)?;
                if let Some(new_state) = cmd.transition {
                    self.state = new_state;
                }
                Ok(cmd.task.unwrap_or(Task::none()))
            }
            Message::Context(context_message) => self.ctx.update(context_message),
        }
    }

    pub fn view(&self) -> Element<'_, Message> {
        self.state.view(&self.ctx).map(|m| m.into())
    }

    /// Files dragged over the window feed the drop zone
    pub fn subscription(&self) -> Subscription<Message> {
        event::listen_with(file_drag_event)
    }
}

fn file_drag_event(event: Event, _status: event::Status, _id: window::Id) -> Option<Message> {
    match event {
        Event::Window(window::Event::FileHovered(_)) => Some(PortraitMessage::DragEntered.into()),
        Event::Window(window::Event::FilesHoveredLeft) => Some(PortraitMessage::DragLeft.into()),
        Event::Window(window::Event::FileDropped(path)) => {
            Some(PortraitMessage::FileDropped(path).into())
        }
        _ => None,
    }
}

/// An error that can travel inside a message
#[derive(Debug, Clone)]
pub struct StringError(pub String);

impl fmt::Display for StringError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::error::Error for StringError {}

impl From<color_eyre::Report> for StringError {
    fn from(e: color_eyre::Report) -> Self {
        Self(format!("{e:?}"))
    }
}

fn italic_text<'a>(t: impl text::IntoFragment<'a>) -> iced::widget::Text<'a> {
    iced::widget::text(t).font(italic_default_font())
}

fn italic_default_font() -> Font {
    Font {
        style: font::Style::Italic,
        ..Font::DEFAULT
    }
}

fn bold_text<'a>(t: impl text::IntoFragment<'a>) -> iced::widget::Text<'a> {
    iced::widget::text(t).font(bold_default_font())
}

fn bold_default_font() -> Font {
    Font {
        weight: font::Weight::Bold,
        ..Font::DEFAULT
    }
}

fn top_level_container<'a, T: Send + 'static>(
    elem: impl Into<Element<'a, T>>,
) -> container::Container<'a, T> {
    container(
        container(scrollable(
            container(elem).padding(padding::all(10).right(20)),
        ))
        .padding(20)
        .max_width(1100),
    )
    .center(Length::Fill)
}

pub trait TryIntoExt<T> {
    fn try_into_ex(self) -> color_eyre::Result<T>;
}

impl<T, Target, E> TryIntoExt<Target> for T
where
    T: TryInto<Target, Error = E>,
    T: fmt::Debug,
    T: Clone,
    E: std::error::Error + Send + Sync + 'static,
{
    fn try_into_ex(self) -> color_eyre::Result<Target> {
        self.clone()
            .try_into()
            .with_context(|| format!("{self:#?}"))
    }
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use super::*;
    use crate::message::UiMessage;

    fn portrait_message(event: Event) -> Option<PortraitMessage> {
        match file_drag_event(event, event::Status::Ignored, window::Id::unique())? {
            Message::Ui(UiMessage::Portrait(m)) => Some(m),
            _ => None,
        }
    }

    #[test]
    fn window_file_events_drive_the_drop_zone() {
        let path = PathBuf::from("/tmp/me.png");
        assert!(matches!(
            portrait_message(Event::Window(window::Event::FileHovered(path.clone()))),
            Some(PortraitMessage::DragEntered)
        ));
        assert!(matches!(
            portrait_message(Event::Window(window::Event::FilesHoveredLeft)),
            Some(PortraitMessage::DragLeft)
        ));
        assert!(matches!(
            portrait_message(Event::Window(window::Event::FileDropped(path.clone()))),
            Some(PortraitMessage::FileDropped(p)) if p == path
        ));
        assert!(portrait_message(Event::Window(window::Event::Focused)).is_none());
    }
}
