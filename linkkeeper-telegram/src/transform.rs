//! Canonicalization: teloxide messages into the core [`Message`] shape, including
//! media-group merging and forward-origin handling.

use linkkeeper_core::{Chat, ForwardOrigin, Message, User};
use teloxide::types::{Message as TgMessage, MessageOrigin};

/// Builds the canonical message for one raw update.
///
/// Caption text overrides body text for photo messages. At most one forward-origin
/// rewrite applies: a channel origin synthesizes the t.me deep link and leaves the
/// text alone; user and hidden-user origins prefix the text with the sender's name.
pub fn transform(message: &TgMessage) -> Message {
    let text = message.text().unwrap_or_default().to_string();
    let mut msg = Message {
        id: message.id.0,
        from: message.from.as_ref().map(to_core_user).unwrap_or_default(),
        chat_id: message.chat.id.0,
        sent: message.date,
        html: text.clone(),
        text,
        url: String::new(),
    };

    if message.photo().is_some() {
        if let Some(caption) = message.caption() {
            if !caption.is_empty() {
                msg.text = caption.to_string();
            }
        }
    }

    match forward_origin(message) {
        Some(ForwardOrigin::Channel { chat, message_id }) => {
            if let Some(username) = chat.username {
                msg.url = format!("https://t.me/{}/{}", username, message_id);
            }
        }
        Some(ForwardOrigin::User {
            display_name,
            username,
        }) => {
            msg.text = format!(
                "{} ({}):\n{}",
                display_name,
                username.unwrap_or_default(),
                msg.text
            );
        }
        Some(ForwardOrigin::HiddenUser { name }) => {
            msg.text = format!("{}:\n{}", name, msg.text);
        }
        None => {}
    }

    msg
}

/// Canonicalizes one flushed batch.
///
/// When every message shares the same non-empty media-group id, the batch is one
/// logical multi-photo post: the single message carrying both a photo and a
/// non-empty caption stands in for the whole group (no such message means the
/// batch yields nothing). Otherwise every message is canonicalized independently,
/// in arrival order.
pub fn canonicalize_batch(batch: &[TgMessage]) -> Vec<Message> {
    let group = batch.first().and_then(|m| m.media_group_id());
    if group.is_some() && batch.iter().all(|m| m.media_group_id() == group) {
        return batch
            .iter()
            .find(|m| m.photo().is_some() && m.caption().is_some_and(|c| !c.is_empty()))
            .map(transform)
            .into_iter()
            .collect();
    }

    batch.iter().map(transform).collect()
}

fn to_core_user(user: &teloxide::types::User) -> User {
    User {
        id: user.id.0 as i64,
        username: user.username.clone(),
        display_name: Some(user.full_name()),
    }
}

/// Maps teloxide's origin onto the three origin kinds we care about. Anonymous
/// group forwards (`MessageOrigin::Chat`) carry no usable identity and get no
/// rewrite.
fn forward_origin(message: &TgMessage) -> Option<ForwardOrigin> {
    match message.forward_origin()? {
        MessageOrigin::Channel {
            chat, message_id, ..
        } => Some(ForwardOrigin::Channel {
            chat: Chat {
                id: chat.id.0,
                title: chat.title().map(str::to_string),
                username: chat.username().map(str::to_string),
            },
            message_id: message_id.0,
        }),
        MessageOrigin::User { sender_user, .. } => Some(ForwardOrigin::User {
            display_name: sender_user.full_name(),
            username: sender_user.username.clone(),
        }),
        MessageOrigin::HiddenUser {
            sender_user_name, ..
        } => Some(ForwardOrigin::HiddenUser {
            name: sender_user_name.clone(),
        }),
        MessageOrigin::Chat { .. } => None,
    }
}
