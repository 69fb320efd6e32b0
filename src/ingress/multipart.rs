// src/ingress/multipart.rs
use crate::errors::ServerError;
use bytes::Bytes;
use futures::executor::block_on;
use mime::Mime;

/// One file field pulled out of a multipart body.
#[derive(Debug)]
pub struct FilePart {
    pub content_type: Option<Mime>,
    pub data: Bytes,
}

/// Find the field called `name` in a `multipart/form-data` body.
///
/// Returns `Ok(None)` when the body has no such field, including when it
/// is not `multipart/form-data` at all.
pub fn find_file_field(
    content_type: &str,
    body: Vec<u8>,
    name: &str,
) -> Result<Option<FilePart>, ServerError> {
    let boundary = match multer::parse_boundary(content_type) {
        Ok(boundary) => boundary,
        Err(e) => {
            tracing::debug!(content_type, error = %e, "body is not multipart");
            return Ok(None);
        }
    };

    let stream = futures::stream::once(async move { Ok::<Bytes, std::io::Error>(Bytes::from(body)) });
    let mut multipart = multer::Multipart::new(stream, boundary);

    block_on(async {
        while let Some(field) = multipart
            .next_field()
            .await
            .map_err(|e| ServerError::BadRequest(format!("Malformed multipart body: {e}")))?
        {
            if field.name() != Some(name) {
                continue;
            }

            let content_type = field.content_type().cloned();
            let data = field
                .bytes()
                .await
                .map_err(|e| ServerError::BadRequest(format!("Malformed multipart body: {e}")))?;
            return Ok(Some(FilePart { content_type, data }));
        }
        Ok::<_, ServerError>(None)
    })
}
