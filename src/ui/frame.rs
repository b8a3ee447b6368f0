//! Container / expander shell around a component
use iced::widget::{button, column, container, row, text};
use iced::{Element, Length};

use uploads_library::config::{Frame, WidgetType};

use crate::Message;

/// Wrap `content` in the shell described by `frame`.
///
/// `expanded` is the current state of an expander; containers ignore it.
pub fn view<'a>(
    uid: &str,
    frame: &Frame,
    expanded: bool,
    content: Element<'a, Message>,
) -> Element<'a, Message> {
    match frame.widget_type {
        WidgetType::Container => {
            let mut body = column![].spacing(10).width(Length::Fill);
            if let Some(header) = frame.header() {
                body = body.push(text(header.to_string()).size(20));
            }
            body.push(content).into()
        }
        WidgetType::Expander => {
            let marker = if expanded { "▾" } else { "▸" };
            let header = button(
                row![
                    text(marker),
                    text(frame.header().unwrap_or_default().to_string())
                ]
                .spacing(8),
            )
            .on_press(Message::ToggleExpanded(uid.to_string()))
            .style(button::text)
            .width(Length::Fill);

            let mut body = column![header].spacing(10).width(Length::Fill);
            if expanded {
                body = body.push(content);
            }

            container(body)
                .padding(10)
                .width(Length::Fill)
                .style(container::rounded_box)
                .into()
        }
    }
}
