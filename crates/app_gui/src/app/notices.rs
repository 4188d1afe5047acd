use labeler_core::{Notice, NoticeLevel};
use rfd::{MessageButtons, MessageDialog, MessageLevel};

fn level(notice: &Notice) -> MessageLevel {
    match notice.level {
        NoticeLevel::Info => MessageLevel::Info,
        NoticeLevel::Warning => MessageLevel::Warning,
        NoticeLevel::Error => MessageLevel::Error,
    }
}

/// Shows a native message box and blocks until it is dismissed.
pub fn show(notice: &Notice) {
    match notice.level {
        NoticeLevel::Info => tracing::info!("{}", notice.message),
        NoticeLevel::Warning => tracing::warn!("{}", notice.message),
        NoticeLevel::Error => tracing::error!("{}", notice.message),
    }
    MessageDialog::new()
        .set_level(level(notice))
        .set_title(&notice.title)
        .set_description(&notice.message)
        .set_buttons(MessageButtons::Ok)
        .show();
}
