//! File uploader view
use iced::widget::{button, column, container, text};
use iced::{Element, Length};

use uploads_library::config::UploaderConfig;

use super::frame;
use crate::Message;

pub fn view<'a>(config: &UploaderConfig, expanded: bool, last_result: &'a str) -> Element<'a, Message> {
    let mut body = column![].spacing(10).width(Length::Fill);

    if let Some(info) = &config.info_msg {
        body = body.push(
            container(text(info.clone()))
                .padding(10)
                .width(Length::Fill)
                .style(container::rounded_box),
        );
    }

    let extensions = config.file_extensions.bare_extensions().join(", ").to_uppercase();
    body = body
        .push(text(config.upload_label.clone().unwrap_or_default()).size(14))
        .push(
            button(text("Browse files"))
                .on_press(Message::PickUploads)
                .padding(10),
        )
        .push(text(format!("Accepted: {}", extensions)).size(12));

    if !last_result.is_empty() {
        body = body.push(text(last_result).size(14));
    }

    frame::view(&config.uid, &config.frame, expanded, body.into())
}
