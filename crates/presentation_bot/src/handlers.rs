//! Update handlers for the Telegram bot
//!
//! Each inbound update is handled in isolation: commands get a static
//! reply, documents and photos run the two-stage intake pipeline and, on
//! success, receive the rendered filing as a document reply. The transient
//! local copy of the filing is deleted after the send attempt either way.

use std::path::Path;

use application::{ExtractionOutcome, IntakeService};
use domain::{ChatId, DocumentKind, InboundDocument};
use integration_telegram::{DocumentAttachment, PhotoSize, TelegramClient, Update};
use tracing::{debug, error, info, warn};

/// Reply to the greeting command.
pub const GREETING_REPLY: &str =
    "Привет! Я помогу вам подготовить заявление о банкротстве. Введите /begin чтобы начать.";

/// Reply to the begin command, explaining what to upload.
pub const BEGIN_REPLY: &str = "Пожалуйста, загрузите ваши документы: паспорт, справки о доходах, \
     информацию о долгах и т.п. Это могут быть фото, PDF или Word-файлы.";

/// Rejection for attachments the pipeline cannot extract text from.
pub const UNSUPPORTED_FORMAT_REPLY: &str = "Поддерживаются только форматы: PDF, DOCX, TXT.";

/// Acknowledgement sent before a document starts processing.
pub const DOCUMENT_PROGRESS_REPLY: &str = "Обрабатываю документ...";

/// Acknowledgement sent before a photo starts processing.
pub const PHOTO_PROGRESS_REPLY: &str = "Обрабатываю изображение...";

/// Generic failure reply for the extraction stage.
pub const EXTRACTION_FAILED_REPLY: &str = "Произошла ошибка при обработке вашего документа.";

/// Generic failure reply for the composition and delivery stage.
pub const FILING_FAILED_REPLY: &str = "Не удалось сформировать заявление. Попробуйте позже.";

/// Dispatch a single update to the matching handler.
///
/// Updates without a message, and messages carrying neither a command nor
/// a supported attachment, are skipped silently.
pub async fn handle_update(client: &TelegramClient, intake: &IntakeService, update: Update) {
    let Some(message) = update.message else {
        debug!(update_id = update.update_id, "Update carries no message, skipping");
        return;
    };

    let chat_id = message.chat_id();

    if let Some(ref attachment) = message.document {
        handle_document(client, intake, chat_id, attachment).await;
    } else if let Some(photo) = message.largest_photo() {
        handle_photo(client, intake, chat_id, photo).await;
    } else if let Some(command) = message.command() {
        handle_command(client, chat_id, command).await;
    } else {
        debug!(chat_id = %chat_id, "Message carries no command or attachment, skipping");
    }
}

/// Static reply for a recognized command, `None` for anything else.
fn command_reply(command: &str) -> Option<&'static str> {
    match command {
        "/start" => Some(GREETING_REPLY),
        "/begin" => Some(BEGIN_REPLY),
        _ => None,
    }
}

async fn handle_command(client: &TelegramClient, chat_id: ChatId, command: &str) {
    let Some(reply) = command_reply(command) else {
        debug!(chat_id = %chat_id, command = %command, "Ignoring unrecognized command");
        return;
    };

    info!(chat_id = %chat_id, command = %command, "Handling command");
    send_text(client, chat_id, reply).await;
}

/// Process a document attachment through extraction and composition.
///
/// The format check runs on the declared file name before any download, so
/// unsupported uploads are rejected without touching the Bot API file
/// endpoints or the completion provider.
async fn handle_document(
    client: &TelegramClient,
    intake: &IntakeService,
    chat_id: ChatId,
    attachment: &DocumentAttachment,
) {
    let file_name = attachment.file_name.as_deref().unwrap_or_default();

    if !DocumentKind::from_file_name(file_name).is_supported() {
        info!(chat_id = %chat_id, file_name = %file_name, "Rejecting unsupported document format");
        send_text(client, chat_id, UNSUPPORTED_FORMAT_REPLY).await;
        return;
    }

    info!(chat_id = %chat_id, file_name = %file_name, "Handling document upload");
    send_text(client, chat_id, DOCUMENT_PROGRESS_REPLY).await;

    let bytes = match client.download_file(&attachment.file_id).await {
        Ok(bytes) => bytes,
        Err(e) => {
            error!(error = %e, chat_id = %chat_id, "Failed to download document");
            send_text(client, chat_id, EXTRACTION_FAILED_REPLY).await;
            return;
        },
    };

    let document = InboundDocument::new(file_name, bytes);
    let applicant_data = match intake.extract_from_document(&document).await {
        Ok(ExtractionOutcome::Data(data)) => data,
        Ok(ExtractionOutcome::Unsupported) => {
            send_text(client, chat_id, UNSUPPORTED_FORMAT_REPLY).await;
            return;
        },
        Err(e) => {
            error!(error = %e, chat_id = %chat_id, file_name = %file_name, "Document extraction failed");
            send_text(client, chat_id, EXTRACTION_FAILED_REPLY).await;
            return;
        },
    };

    deliver_filing(client, intake, chat_id, &applicant_data).await;
}

/// Process a photo attachment through recognition and composition.
async fn handle_photo(
    client: &TelegramClient,
    intake: &IntakeService,
    chat_id: ChatId,
    photo: &PhotoSize,
) {
    info!(
        chat_id = %chat_id,
        width = photo.width,
        height = photo.height,
        "Handling photo upload"
    );
    send_text(client, chat_id, PHOTO_PROGRESS_REPLY).await;

    let bytes = match client.download_file(&photo.file_id).await {
        Ok(bytes) => bytes,
        Err(e) => {
            error!(error = %e, chat_id = %chat_id, "Failed to download photo");
            send_text(client, chat_id, EXTRACTION_FAILED_REPLY).await;
            return;
        },
    };

    let applicant_data = match intake.extract_from_photo(&bytes).await {
        Ok(data) => data,
        Err(e) => {
            error!(error = %e, chat_id = %chat_id, "Photo extraction failed");
            send_text(client, chat_id, EXTRACTION_FAILED_REPLY).await;
            return;
        },
    };

    deliver_filing(client, intake, chat_id, &applicant_data).await;
}

/// Stage two: compose the filing, send it to the chat, delete the local copy.
///
/// The transient file is removed after the send attempt on both the success
/// and the failure path; a failed delete is logged, never surfaced.
async fn deliver_filing(
    client: &TelegramClient,
    intake: &IntakeService,
    chat_id: ChatId,
    applicant_data: &str,
) {
    let filing = match intake.compose_filing(applicant_data).await {
        Ok(filing) => filing,
        Err(e) => {
            error!(error = %e, chat_id = %chat_id, "Filing composition failed");
            send_text(client, chat_id, FILING_FAILED_REPLY).await;
            return;
        },
    };

    let bytes = match tokio::fs::read(&filing.path).await {
        Ok(bytes) => bytes,
        Err(e) => {
            error!(error = %e, path = %filing.path.display(), "Failed to read rendered filing");
            remove_transient_file(&filing.path).await;
            send_text(client, chat_id, FILING_FAILED_REPLY).await;
            return;
        },
    };

    let send_result = client.send_document(chat_id, &filing.file_name, bytes).await;
    remove_transient_file(&filing.path).await;

    match send_result {
        Ok(_) => {
            info!(
                chat_id = %chat_id,
                file_name = %filing.file_name,
                paragraphs = filing.paragraph_count,
                elapsed_ms = filing.processing_time_ms,
                "Filing delivered"
            );
        },
        Err(e) => {
            error!(error = %e, chat_id = %chat_id, "Failed to send filing");
            send_text(client, chat_id, FILING_FAILED_REPLY).await;
        },
    }
}

/// Best-effort delete of the rendered filing on disk.
async fn remove_transient_file(path: &Path) {
    if let Err(e) = tokio::fs::remove_file(path).await {
        warn!(error = %e, path = %path.display(), "Failed to delete transient filing file");
    }
}

/// Send a text reply, logging a failure instead of propagating it.
async fn send_text(client: &TelegramClient, chat_id: ChatId, text: &str) {
    if let Err(e) = client.send_message(chat_id, text).await {
        warn!(error = %e, chat_id = %chat_id, "Failed to send reply");
    }
}
