use std::io::Write;
use std::time::Instant;
use tokio::sync::oneshot;
use tokio::task::JoinHandle;
use tokio::time::{interval, Duration};

const FRAMES: [&str; 10] = ["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];
const FRAME_INTERVAL_MS: u64 = 120;

/// Spinner on stderr while a provider call is in flight.
pub struct AnimatedLogger {
    message: String,
    started_at: Option<Instant>,
    stop: Option<oneshot::Sender<()>>,
    task: Option<JoinHandle<()>>,
}

impl AnimatedLogger {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            started_at: None,
            stop: None,
            task: None,
        }
    }

    pub fn start(&mut self) {
        let (stop_tx, mut stop_rx) = oneshot::channel();
        let message = self.message.clone();
        let started_at = Instant::now();

        let task = tokio::spawn(async move {
            let mut ticker = interval(Duration::from_millis(FRAME_INTERVAL_MS));
            let mut frame = 0;

            loop {
                tokio::select! {
                    _ = ticker.tick() => {
                        eprint!("\r{} {} ({:.1}s) ", FRAMES[frame], message, started_at.elapsed().as_secs_f64());
                        let _ = std::io::stderr().flush();
                        frame = (frame + 1) % FRAMES.len();
                    }
                    _ = &mut stop_rx => break,
                }
            }
        });

        self.started_at = Some(started_at);
        self.stop = Some(stop_tx);
        self.task = Some(task);
    }

    pub async fn stop(&mut self, final_message: &str) {
        self.finish("✅", final_message).await;
    }

    pub async fn error(&mut self, error_message: &str) {
        self.finish("❌", error_message).await;
    }

    async fn finish(&mut self, marker: &str, text: &str) {
        if let Some(stop) = self.stop.take() {
            let _ = stop.send(());
        }
        if let Some(task) = self.task.take() {
            let _ = task.await;
        }

        let elapsed = self
            .started_at
            .take()
            .map(|t| format!(" ({:.1}s)", t.elapsed().as_secs_f64()))
            .unwrap_or_default();

        eprintln!("\r\x1b[K{} {}{}", marker, text, elapsed);
        let _ = std::io::stderr().flush();
    }
}
