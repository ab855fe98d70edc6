use async_trait::async_trait;
use attendance_api::{domain::QrPayload, ApiError, AttendanceClient};
use image::{imageops::FilterType, GrayImage};
use std::time::Duration;
use thiserror::Error;
use tokio::sync::mpsc::UnboundedSender;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

/// Side length of the rendered QR image, in pixels.
pub const QR_SIZE: u32 = 300;

#[async_trait]
pub trait QrSource: Send + Sync + 'static {
    async fn fetch_qr(&self, company_id: i64) -> Result<QrPayload, ApiError>;
}

#[async_trait]
impl QrSource for AttendanceClient {
    async fn fetch_qr(&self, company_id: i64) -> Result<QrPayload, ApiError> {
        self.current_qr(company_id).await
    }
}

#[derive(Debug, Clone)]
pub struct QrFrame {
    pub company_id: i64,
    pub caption: String,
    pub image: GrayImage,
}

#[derive(Debug, Clone)]
pub enum PollEvent {
    Frame(QrFrame),
    Warning { company_id: i64, message: String },
}

impl PollEvent {
    pub fn company_id(&self) -> i64 {
        match self {
            PollEvent::Frame(frame) => frame.company_id,
            PollEvent::Warning { company_id, .. } => *company_id,
        }
    }
}

pub type PollTx = UnboundedSender<PollEvent>;

#[derive(Error, Debug)]
pub enum FrameError {
    #[error("{0}")]
    Base64(#[from] base64::DecodeError),
    #[error("{0}")]
    Image(#[from] image::ImageError),
}

/// Decode raw QR image bytes and scale them to the fixed render size.
pub fn decode_frame(encoded: &[u8], company_id: i64) -> Result<QrFrame, FrameError> {
    let decoded = image::load_from_memory(encoded)?;
    let image = decoded
        .resize_exact(QR_SIZE, QR_SIZE, FilterType::Nearest)
        .to_luma8();

    Ok(QrFrame {
        company_id,
        caption: format!("Company ID: {} | Active QR", company_id),
        image,
    })
}

/// One fetch-decode cycle. Every failure becomes a warning event.
pub async fn poll_once<S: QrSource>(source: &S, company_id: i64) -> PollEvent {
    let warning = |message: String| PollEvent::Warning {
        company_id,
        message,
    };

    let payload = match source.fetch_qr(company_id).await {
        Ok(payload) => payload,
        Err(e) => {
            tracing::warn!(company_id, error = %e, "QR fetch failed");
            return warning(format!("No active QR found for this company. ({})", e));
        }
    };

    let bytes = match payload.decode_image() {
        Some(Ok(bytes)) => bytes,
        Some(Err(e)) => {
            return warning(format!("Failed to load QR image: {}", FrameError::from(e)))
        }
        None => return warning("QR image data missing in backend response.".to_string()),
    };

    // The backend echoes the company it resolved; prefer it for the caption.
    match decode_frame(&bytes, payload.company_id.unwrap_or(company_id)) {
        Ok(frame) => PollEvent::Frame(QrFrame {
            company_id,
            ..frame
        }),
        Err(e) => warning(format!("Failed to load QR image: {}", e)),
    }
}

/// Background QR refresh for one company.
///
/// Fetches immediately, then once per `period`. Stops when [`QrPoller::stop`]
/// is called, when the handle is dropped, or when the receiving side of the
/// event channel is gone.
#[derive(Debug)]
pub struct QrPoller {
    company_id: i64,
    handle: JoinHandle<()>,
}

impl QrPoller {
    pub fn start<S: QrSource>(
        source: S,
        company_id: i64,
        period: Duration,
        events: PollTx,
    ) -> Self {
        let handle = tokio::spawn(async move {
            let mut ticker = tokio::time::interval(period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

            loop {
                ticker.tick().await;
                let event = poll_once(&source, company_id).await;
                if events.send(event).is_err() {
                    break;
                }
            }
        });

        tracing::info!(
            company_id,
            period_secs = period.as_secs(),
            "QR polling started"
        );
        Self { company_id, handle }
    }

    pub fn stop(self) {
        tracing::info!(company_id = self.company_id, "QR polling stopped");
    }
}

impl Drop for QrPoller {
    fn drop(&mut self) {
        self.handle.abort();
    }
}
