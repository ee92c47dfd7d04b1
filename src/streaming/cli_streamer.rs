use std::io::{self, Write};

use log::{debug, error, info};
use tokio::{sync::watch, task::JoinHandle};

use super::streamer::{OutputStreamer, ProgressInfo, StreamEvent};
use crate::error::AppError;
use crate::session::{ProgressEstimate, SMOOTH_DURATION, SMOOTH_STEP, smooth_steps};

const BAR_WIDTH: usize = 30;

#[derive(Debug, Clone, PartialEq)]
struct BarTarget {
    percent: f64,
    status: String,
}

/// Slides the bar on its own task so the response is read while frames are drawn.
/// A newer target cuts the current slide short.
struct BarAnimator {
    targets: watch::Sender<BarTarget>,
    task: JoinHandle<f64>,
}

impl BarAnimator {
    fn start(from: f64, target: BarTarget) -> Self {
        let (targets, receiver) = watch::channel(target);
        let task = tokio::spawn(slide_bar(receiver, from));
        BarAnimator { targets, task }
    }

    /// Snaps to the latest target and returns the percent left on screen.
    async fn stop(self) -> Option<f64> {
        drop(self.targets);
        match self.task.await {
            Ok(percent) => Some(percent),
            Err(e) => {
                error!("Progress animation failed: {}", e);
                None
            }
        }
    }
}

async fn slide_bar(mut targets: watch::Receiver<BarTarget>, mut shown: f64) -> f64 {
    loop {
        let target = targets.borrow_and_update().clone();
        let frames = smooth_steps(shown, target.percent, SMOOTH_DURATION, SMOOTH_STEP);

        for percent in frames {
            match targets.has_changed() {
                Ok(true) => break,
                Ok(false) => {}
                Err(_) => {
                    if let Err(e) = draw_bar(target.percent, &target.status) {
                        error!("Failed to draw progress: {}", e);
                        return shown;
                    }
                    return target.percent;
                }
            }

            if let Err(e) = draw_bar(percent, &target.status) {
                error!("Failed to draw progress: {}", e);
                return shown;
            }
            shown = percent;
            tokio::time::sleep(SMOOTH_STEP).await;
        }

        if targets.changed().await.is_err() {
            return shown;
        }
    }
}

fn draw_bar(percent: f64, status: &str) -> io::Result<()> {
    print!("\r\x1b[K{}", render_bar(percent, status));
    io::stdout().flush()
}

pub struct CliStreamer {
    pub show_progress: bool,
    displayed_percent: f64,
    animator: Option<BarAnimator>,
}

impl CliStreamer {
    pub fn new(new_show_progress: bool) -> Self {
        CliStreamer {
            show_progress: new_show_progress,
            displayed_percent: 0.0,
            animator: None,
        }
    }

    pub fn write(&mut self, data: &str) -> Result<(), AppError> {
        print!("{}", data);
        io::stdout().flush()?;
        Ok(())
    }

    pub fn write_message(&mut self, message: &str) -> Result<(), AppError> {
        println!("{}", message);
        io::stdout().flush()?;
        Ok(())
    }

    pub fn flush(&mut self) -> Result<(), AppError> {
        println!();
        io::stdout().flush()?;
        Ok(())
    }

    pub fn clear_line(&mut self) -> Result<(), AppError> {
        print!("\r\x1b[K");
        io::stdout().flush()?;
        Ok(())
    }

    async fn animate_progress(&mut self, progress: &ProgressInfo) {
        let mut target = BarTarget {
            percent: progress.estimate.percent,
            status: progress.estimate.remaining_text(),
        };

        if let Some(animator) = &self.animator {
            match animator.targets.send(target) {
                Ok(()) => return,
                Err(watch::error::SendError(unsent)) => target = unsent,
            }
        }

        self.stop_animation().await;
        self.animator = Some(BarAnimator::start(self.displayed_percent, target));
    }

    async fn stop_animation(&mut self) {
        if let Some(animator) = self.animator.take() {
            if let Some(percent) = animator.stop().await {
                self.displayed_percent = percent;
            }
        }
    }
}

/// One-line progress bar, e.g. `[#######-------]  50% Estimated time remaining: 0:12`
pub fn render_bar(percent: f64, status: &str) -> String {
    let clamped = percent.clamp(0.0, 100.0);
    let filled = ((clamped / 100.0) * BAR_WIDTH as f64).round() as usize;

    format!(
        "[{}{}] {:>3.0}% {}",
        "#".repeat(filled),
        "-".repeat(BAR_WIDTH - filled),
        clamped,
        status
    )
}

#[async_trait::async_trait]
impl OutputStreamer for CliStreamer {
    async fn finish(&mut self) -> Result<(), AppError> {
        self.handle_event(StreamEvent::Finished).await
    }

    async fn handle_event(&mut self, event: StreamEvent) -> Result<(), AppError> {
        debug!("{:?}", event);
        match event {
            StreamEvent::Progress(progress) => {
                if self.show_progress {
                    self.animate_progress(&progress).await;
                } else {
                    self.write_message(&format!(
                        "{}/{} ({:.0}%) {}",
                        progress.completed,
                        progress.total,
                        progress.estimate.percent,
                        progress.estimate.remaining_text()
                    ))?;
                }
            }
            StreamEvent::Summary(summary) => {
                self.stop_animation().await;
                let complete = ProgressEstimate::complete();
                if self.show_progress {
                    self.clear_line()?;
                    self.write(&render_bar(complete.percent, "Completed!"))?;
                    self.flush()?;
                    self.displayed_percent = complete.percent;
                }
                self.write_message(&summary)?;
                info!("Summary displayed");
            }
            StreamEvent::Reply(reply) => {
                self.stop_animation().await;
                self.write_message(&format!("bot> {}", reply))?;
            }
            StreamEvent::Status(status) => {
                self.stop_animation().await;
                if self.show_progress {
                    self.clear_line()?;
                    self.write(&format!("\r{}\n", status))?;
                }
                info!("Status: {}", status);
            }
            StreamEvent::Error(error) => {
                self.stop_animation().await;
                if self.show_progress {
                    self.clear_line()?;
                }
                self.write(&format!("\rError: {}\n", error))?;
                error!("Stream error: {}", error);
            }
            StreamEvent::Finished => {
                self.stop_animation().await;
                if self.show_progress {
                    self.clear_line()?;
                }
                info!("Streaming finished");
            }
        }

        Ok(())
    }
}
