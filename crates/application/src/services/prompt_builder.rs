//! Prompt construction for the two completion stages
//!
//! The pipeline asks the provider two questions per user flow: first to
//! pull applicant facts out of raw document text, then to compose the
//! court filing from those facts. Both prompts are fixed Russian-language
//! scaffolds with the variable part spliced in.

use domain::PromptMessage;

/// Maximum number of characters of document text forwarded to the provider
///
/// Counted in characters, not bytes, so multi-byte Cyrillic text is never
/// split mid-character.
pub const EXTRACTION_TEXT_LIMIT: usize = 3000;

/// Build the extraction prompt for text pulled out of a document
#[must_use]
pub fn extraction_prompt(document_text: &str) -> PromptMessage {
    let excerpt: String = document_text.chars().take(EXTRACTION_TEXT_LIMIT).collect();
    PromptMessage::user(format!(
        "На основании следующего текста из документа:\n{excerpt}\n\
         Извлеки анкетные данные заявителя и информацию о долгах:\n\
         - ФИО (если есть)\n\
         - Дата рождения (если есть)\n\
         - Адрес регистрации (если есть)\n\
         - Паспортные данные (если есть)\n\
         - Общая сумма долга (если есть)\n\
         - Кредиторы (если есть)"
    ))
}

/// Build the extraction prompt for a photographed document
#[must_use]
pub fn photo_prompt(image_data_uri: &str) -> PromptMessage {
    PromptMessage::user_with_image(
        "Распознай текст и извлеки анкетные данные с этой фотографии.",
        image_data_uri,
    )
}

/// Build the filing composition prompt from extracted applicant data
#[must_use]
pub fn filing_prompt(applicant_data: &str) -> PromptMessage {
    PromptMessage::user(format!(
        "На основании следующих данных:\n{applicant_data}\n\n\
         Составь официальное заявление в суд о признании гражданина банкротом \
         согласно ФЗ №127-ФЗ."
    ))
}
