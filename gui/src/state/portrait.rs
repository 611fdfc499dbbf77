use color_eyre::Result;
use engine::{UiStatus, session::Display};
use iced::{
    Border, Color, ContentFit, Element, Length,
    alignment::Horizontal,
    widget::{self, button, column, container, row, stack, text},
};

use crate::{
    APP_NAME, TryIntoExt, bold_text,
    context::Context,
    italic_text,
    message::{UiMessage, ui_messages::Portrait as MyMessage},
    state::{State, StateCommand, cmd},
    top_level_container,
};

const ACCENT: Color = Color::from_rgb(0.55, 0.36, 0.96);
const ERROR_RED: Color = Color::from_rgb(0.8, 0.2, 0.2);

/// The portrait generator view: intake on the left, result on the right
#[derive(Debug, Clone)]
pub struct Portrait;

impl State for Portrait {
    fn update(&mut self, event: UiMessage, ctx: &mut Context) -> Result<StateCommand> {
        use MyMessage::*;
        match event.try_into_ex()? {
            BrowsePressed => cmd::task(ctx.pick_image()),
            DragEntered => {
                ctx.session.drag_entered();
                cmd::none()
            }
            DragLeft => {
                ctx.session.drag_left();
                cmd::none()
            }
            FileDropped(path) => ctx
                .load_dropped(path)
                .map_or_else(cmd::none, cmd::task),
            ClearPressed => {
                ctx.clear();
                cmd::none()
            }
            GeneratePressed => cmd::task(ctx.generate()),
            DownloadPressed => cmd::task(ctx.download()?),
        }
    }

    fn view<'a>(&'a self, ctx: &'a Context) -> Element<'a, UiMessage> {
        let header = column![
            italic_text("Next-Gen AI Portraits").size(14),
            bold_text(APP_NAME).size(40),
            text("Turn ordinary photos into magical watercolor illustrations in seconds."),
        ]
        .spacing(8)
        .align_x(Horizontal::Center);

        let intake = column![drop_zone(ctx), generate_button(ctx)]
            .spacing(20)
            .width(Length::FillPortion(1));

        let body = row![intake, result_area(ctx)].spacing(30);

        top_level_container(
            column![
                header,
                body,
                text!("Backend: {}", ctx.config.api_url).size(12)
            ]
            .spacing(40)
            .align_x(Horizontal::Center),
        )
        .into()
    }

    fn clone(&self) -> Box<dyn State> {
        Box::new(Clone::clone(self))
    }
}

fn drop_zone(ctx: &Context) -> Element<'_, UiMessage> {
    let dragging = ctx.session.status() == UiStatus::Dragging;

    let content: Element<'_, UiMessage> = match &ctx.preview {
        Some(handle) => stack![
            widget::image(handle)
                .width(Length::Fill)
                .height(Length::Fill)
                .content_fit(ContentFit::Cover),
            container(button("✕").on_press(MyMessage::ClearPressed.into()))
                .align_right(Length::Fill)
                .padding(10)
        ]
        .into(),
        None => column![
            text("Drag & drop your photo here").size(18),
            text("or click to browse files").size(14),
            button("Browse").on_press(MyMessage::BrowsePressed.into()),
        ]
        .spacing(10)
        .align_x(Horizontal::Center)
        .into(),
    };

    container(content)
        .center_x(Length::Fill)
        .center_y(Length::Fixed(280.))
        .padding(20)
        .style(move |_theme| {
            let border_color = if dragging {
                ACCENT
            } else {
                Color::from_rgb(0.8, 0.8, 0.8)
            };
            container::Style::default()
                .background(Color::from_rgb(0.97, 0.97, 0.97))
                .border(Border::default().rounded(16).width(2).color(border_color))
        })
        .into()
}

fn generate_label(status: UiStatus) -> &'static str {
    match status {
        UiStatus::Loading => "Creating Magic...",
        UiStatus::Idle | UiStatus::Dragging => "Generate Artwork",
    }
}

fn generate_button(ctx: &Context) -> Element<'_, UiMessage> {
    button(
        text(generate_label(ctx.session.status()))
            .width(Length::Fill)
            .center(),
    )
    .width(Length::Fill)
    .padding(15)
    .on_press_maybe(
        ctx.session
            .can_generate()
            .then_some(MyMessage::GeneratePressed.into()),
    )
    .into()
}

/// Exactly one of placeholder, result or error
fn result_area(ctx: &Context) -> Element<'_, UiMessage> {
    let content: Element<'_, UiMessage> = match ctx.session.display() {
        Display::Placeholder => text("Your masterpiece will appear here").into(),
        Display::Result(result) => {
            let picture: Element<'_, UiMessage> = match &ctx.result_image {
                Some(Ok(handle)) => widget::image(handle)
                    .width(Length::Fill)
                    .content_fit(ContentFit::Contain)
                    .into(),
                Some(Err(_)) => italic_text("Couldn't load preview").into(),
                None => text("Loading preview...").into(),
            };
            column![
                picture,
                italic_text("✨ \"Watercolor illustration portrait\""),
                text(&result.url).size(12),
                button("Download").on_press(MyMessage::DownloadPressed.into()),
            ]
            .spacing(15)
            .align_x(Horizontal::Center)
            .into()
        }
        Display::Error(notice) => column![
            bold_text(&notice.title).color(ERROR_RED),
            text(&notice.message),
        ]
        .spacing(8)
        .into(),
    };

    container(content)
        .center_x(Length::FillPortion(1))
        .center_y(Length::Fixed(400.))
        .padding(20)
        .into()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn button_label_follows_status() {
        assert_eq!(generate_label(UiStatus::Idle), "Generate Artwork");
        assert_eq!(generate_label(UiStatus::Dragging), "Generate Artwork");
        assert_eq!(generate_label(UiStatus::Loading), "Creating Magic...");
    }
}
