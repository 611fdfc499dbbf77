use color_eyre::Result;
use iced::{
    Border, Color, Element, Length,
    widget::{
        button, column, container, scrollable, space, stack, text_editor, text_editor::Action,
    },
};

use crate::{
    bold_text,
    context::Context,
    message::{UiMessage, ui_messages::ErrorModal as MyMessage},
    state::{State, StateCommand, cmd},
};

/// Error details on top of the state that failed. Window file events still
/// reach that state, so dropping a new photo works while this is open.
#[derive(Debug)]
pub struct ErrorModal {
    parent: Box<dyn State>,
    title: String,
    details: text_editor::Content,
}

impl ErrorModal {
    pub fn new(parent: Box<dyn State>, title: impl Into<String>, details: &str) -> Self {
        Self {
            parent,
            title: title.into(),
            details: text_editor::Content::with_text(details),
        }
    }
}

impl State for ErrorModal {
    fn update(&mut self, event: UiMessage, ctx: &mut Context) -> Result<StateCommand> {
        let msg = match event {
            UiMessage::ErrorModal(msg) => msg,
            other => {
                let StateCommand { task, transition } = self.parent.update(other, ctx)?;
                if let Some(parent) = transition {
                    self.parent = parent;
                }
                return Ok(StateCommand {
                    task,
                    transition: None,
                });
            }
        };

        match msg {
            MyMessage::Dismiss => Ok(StateCommand {
                task: None,
                transition: Some(self.parent.clone()),
            }),
            MyMessage::EditAction(action) => {
                // read-only, but selection and scrolling are fine
                if !matches!(action, Action::Edit(_)) {
                    self.details.perform(action);
                }
                cmd::none()
            }
        }
    }

    fn view<'a>(&'a self, ctx: &'a Context) -> Element<'a, UiMessage> {
        let dialog = container(scrollable(
            column![
                bold_text(&self.title).size(20),
                container(
                    text_editor(&self.details).on_action(|a| MyMessage::EditAction(a).into())
                )
                .style(|_theme| container::background(Color::from_rgb(0.95, 0.95, 0.95)))
                .padding(20),
                container(button("Ok").on_press(MyMessage::Dismiss.into()))
                    .align_right(Length::Fill)
            ]
            .spacing(10),
        ))
        .padding(20)
        .max_width(700)
        .max_height(700)
        .style(|_theme| container::background(Color::WHITE).border(Border::default().rounded(10)));

        stack![
            self.parent.view(ctx),
            container(space())
                .width(Length::Fill)
                .height(Length::Fill)
                .style(|_| container::background(Color::from_rgba(0., 0., 0., 0.3))),
            container(dialog).center(Length::Fill)
        ]
        .into()
    }

    fn clone(&self) -> Box<dyn State> {
        Box::new(Self {
            parent: self.parent.clone(),
            title: self.title.clone(),
            details: self.details.clone(),
        })
    }
}

#[cfg(test)]
mod tests {
    use engine::{Config, UiStatus};

    use super::*;
    use crate::{message::ui_messages::Portrait as PortraitMessage, state::Portrait};

    fn context() -> Context {
        Context::from_config(Config {
            api_url: "http://localhost".into(),
        })
    }

    fn modal() -> ErrorModal {
        ErrorModal::new(Box::new(Portrait), "Error", "Not an image")
    }

    #[test]
    fn drag_events_reach_the_view_below() -> Result<()> {
        let mut ctx = context();
        let mut modal = modal();

        let cmd = modal.update(PortraitMessage::DragEntered.into(), &mut ctx)?;
        assert!(cmd.transition.is_none());
        assert_eq!(ctx.session.status(), UiStatus::Dragging);

        modal.update(PortraitMessage::DragLeft.into(), &mut ctx)?;
        assert_eq!(ctx.session.status(), UiStatus::Idle);
        Ok(())
    }

    #[test]
    fn drop_while_open_starts_loading_the_file() -> Result<()> {
        let mut ctx = context();
        let mut modal = modal();

        let cmd = modal.update(
            PortraitMessage::FileDropped("/tmp/me.png".into()).into(),
            &mut ctx,
        )?;
        assert!(cmd.task.is_some());
        assert!(cmd.transition.is_none());
        Ok(())
    }

    #[test]
    fn dismiss_returns_to_the_view_below() -> Result<()> {
        let mut ctx = context();
        let mut modal = modal();
        let cmd = modal.update(MyMessage::Dismiss.into(), &mut ctx)?;
        assert!(cmd.transition.is_some());
        Ok(())
    }
}
