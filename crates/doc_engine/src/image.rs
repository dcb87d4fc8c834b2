//! Image normalization for multimodal prompts

use std::io::Cursor;

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use tracing::{debug, instrument};

use crate::error::DocumentError;

/// Re-encode raw image bytes into a `data:image/<subtype>;base64,<payload>` URI
///
/// The container format is sniffed from the bytes themselves and preserved
/// through the re-encode, so the declared MIME subtype always matches the
/// actual payload.
#[instrument(skip(bytes), fields(size = bytes.len()))]
pub fn to_data_uri(bytes: &[u8]) -> Result<String, DocumentError> {
    let format =
        image::guess_format(bytes).map_err(|e| DocumentError::ImageDecode(e.to_string()))?;
    let decoded = image::load_from_memory_with_format(bytes, format)
        .map_err(|e| DocumentError::ImageDecode(e.to_string()))?;

    let mut buffer = Cursor::new(Vec::new());
    decoded
        .write_to(&mut buffer, format)
        .map_err(|e| DocumentError::ImageDecode(e.to_string()))?;

    let payload = STANDARD.encode(buffer.get_ref());
    debug!(
        mime = format.to_mime_type(),
        encoded_len = payload.len(),
        "image normalized for prompt embedding"
    );
    Ok(format!("data:{};base64,{payload}", format.to_mime_type()))
}
