use crate::metrics::ResponseLog;
use axum::body::Body;
use bytes::Bytes;
use flate2::write::GzEncoder;
use flate2::Compression;
use http_body::{Body as HttpBody, Frame, SizeHint};
use pin_project_lite::pin_project;
use std::io::Write;
use std::pin::Pin;
use std::task::{ready, Context, Poll};
use tracing::trace;

pin_project! {
    /// Response body seen by the transport.
    ///
    /// Frames from the handler's body are optionally gzip-encoded at the
    /// fastest level, then counted into the request's metrics. The gzip
    /// trailer is written when the inner body ends. Dropping the body
    /// drops the [`ResponseLog`], which emits the response event.
    pub struct MeteredBody {
        #[pin]
        inner: Body,
        encoder: Option<GzEncoder<Vec<u8>>>,
        log: ResponseLog,
        done: bool,
    }
}

impl MeteredBody {
    pub fn new(inner: Body, compress: bool, log: ResponseLog) -> Self {
        Self {
            inner,
            encoder: compress.then(|| GzEncoder::new(Vec::new(), Compression::fast())),
            log,
            done: false,
        }
    }
}

impl HttpBody for MeteredBody {
    type Data = Bytes;
    type Error = axum::Error;

    fn poll_frame(
        self: Pin<&mut Self>,
        cx: &mut Context<'_>,
    ) -> Poll<Option<Result<Frame<Self::Data>, Self::Error>>> {
        let mut this = self.project();

        loop {
            if *this.done {
                return Poll::Ready(None);
            }

            let frame = match ready!(this.inner.as_mut().poll_frame(cx)) {
                Some(Ok(frame)) => frame,
                Some(Err(err)) => return Poll::Ready(Some(Err(err))),
                None => {
                    *this.done = true;
                    let Some(encoder) = this.encoder.take() else {
                        return Poll::Ready(None);
                    };
                    return match encoder.finish() {
                        Ok(tail) if tail.is_empty() => Poll::Ready(None),
                        Ok(tail) => {
                            this.log.metrics().record_bytes(tail.len());
                            Poll::Ready(Some(Ok(Frame::data(Bytes::from(tail)))))
                        }
                        Err(err) => Poll::Ready(Some(Err(axum::Error::new(err)))),
                    };
                }
            };

            // Trailers pass through untouched; handlers here never send any.
            let data = match frame.into_data() {
                Ok(data) => data,
                Err(frame) => return Poll::Ready(Some(Ok(frame))),
            };

            let data = match this.encoder.as_mut() {
                None => data,
                Some(encoder) => {
                    if let Err(err) = encoder.write_all(&data) {
                        trace!("error encoding gzip: {}", err);
                        return Poll::Ready(Some(Err(axum::Error::new(err))));
                    }
                    let encoded = std::mem::take(encoder.get_mut());
                    if encoded.is_empty() {
                        continue;
                    }
                    Bytes::from(encoded)
                }
            };

            this.log.metrics().record_bytes(data.len());
            return Poll::Ready(Some(Ok(Frame::data(data))));
        }
    }

    fn is_end_stream(&self) -> bool {
        self.done || (self.encoder.is_none() && self.inner.is_end_stream())
    }

    fn size_hint(&self) -> SizeHint {
        match self.encoder {
            Some(_) => SizeHint::default(),
            None => self.inner.size_hint(),
        }
    }
}
