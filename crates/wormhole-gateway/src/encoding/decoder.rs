use axum::body::Body;
use bytes::Bytes;
use flate2::write::GzDecoder;
use http_body::{Body as HttpBody, Frame};
use http_body_util::BodyExt;
use pin_project_lite::pin_project;
use std::io::Write;
use std::pin::Pin;
use std::task::{ready, Context, Poll};
use thiserror::Error;
use tracing::trace;

/// The request body could not be opened as a gzip stream.
#[derive(Debug, Error)]
pub enum GzipHeaderError {
    #[error("malformed gzip header: {0}")]
    Malformed(#[source] std::io::Error),
    #[error("request body ended inside the gzip header")]
    Truncated,
    #[error("request body unreadable: {0}")]
    Body(#[source] axum::Error),
}

pin_project! {
    /// Request body decoding a gzip stream frame by frame.
    ///
    /// The gzip header is checked up front by [`GzipDecodedBody::open`].
    /// Corrupt or truncated input after the header surfaces as a body
    /// error, so handlers see it as an unreadable body. The decoder is
    /// released as soon as the inner body ends, and with the body otherwise.
    pub struct GzipDecodedBody {
        #[pin]
        inner: Body,
        decoder: Option<GzDecoder<Vec<u8>>>,
        pending_error: Option<std::io::Error>,
    }
}

impl GzipDecodedBody {
    /// Reads `inner` until the gzip header has been parsed.
    ///
    /// Data decoded while reading ahead is kept and yielded first.
    pub async fn open(mut inner: Body) -> Result<Self, GzipHeaderError> {
        let mut decoder = GzDecoder::new(Vec::new());
        let mut pending_error = None;

        while decoder.header().is_none() {
            let data = match inner.frame().await {
                Some(Ok(frame)) => match frame.into_data() {
                    Ok(data) => data,
                    Err(_) => continue,
                },
                Some(Err(err)) => return Err(GzipHeaderError::Body(err)),
                None => return Err(GzipHeaderError::Truncated),
            };
            if let Err(err) = decoder.write_all(&data) {
                if decoder.header().is_none() {
                    return Err(GzipHeaderError::Malformed(err));
                }
                pending_error = Some(err);
            }
        }

        Ok(Self {
            inner,
            decoder: Some(decoder),
            pending_error,
        })
    }
}

impl HttpBody for GzipDecodedBody {
    type Data = Bytes;
    type Error = axum::Error;

    fn poll_frame(
        self: Pin<&mut Self>,
        cx: &mut Context<'_>,
    ) -> Poll<Option<Result<Frame<Self::Data>, Self::Error>>> {
        let mut this = self.project();

        if let Some(err) = this.pending_error.take() {
            trace!("error decoding gzip: {}", err);
            this.decoder.take();
            return Poll::Ready(Some(Err(axum::Error::new(err))));
        }

        loop {
            let Some(decoder) = this.decoder.as_mut() else {
                return Poll::Ready(None);
            };
            let buffered = std::mem::take(decoder.get_mut());
            if !buffered.is_empty() {
                return Poll::Ready(Some(Ok(Frame::data(Bytes::from(buffered)))));
            }

            match ready!(this.inner.as_mut().poll_frame(cx)) {
                Some(Ok(frame)) => {
                    let data = match frame.into_data() {
                        Ok(data) => data,
                        Err(frame) => return Poll::Ready(Some(Ok(frame))),
                    };
                    let Some(decoder) = this.decoder.as_mut() else {
                        return Poll::Ready(None);
                    };
                    if let Err(err) = decoder.write_all(&data) {
                        trace!("error decoding gzip: {}", err);
                        this.decoder.take();
                        return Poll::Ready(Some(Err(axum::Error::new(err))));
                    }
                    let decoded = std::mem::take(decoder.get_mut());
                    if decoded.is_empty() {
                        continue;
                    }
                    return Poll::Ready(Some(Ok(Frame::data(Bytes::from(decoded)))));
                }
                Some(Err(err)) => return Poll::Ready(Some(Err(err))),
                None => {
                    let Some(decoder) = this.decoder.take() else {
                        return Poll::Ready(None);
                    };
                    return match decoder.finish() {
                        Ok(rest) if rest.is_empty() => Poll::Ready(None),
                        Ok(rest) => Poll::Ready(Some(Ok(Frame::data(Bytes::from(rest))))),
                        Err(err) => {
                            trace!("gzip stream ended early: {}", err);
                            Poll::Ready(Some(Err(axum::Error::new(err))))
                        }
                    };
                }
            }
        }
    }

    fn is_end_stream(&self) -> bool {
        self.decoder.is_none()
    }
}
