// src/browser.rs

//! Headless browser session bootstrap and teardown.
//!
//! Launches a sandboxed, single-process Chrome over CDP with per-run scratch
//! directories, so concurrent invocations on shared infrastructure cannot
//! interfere through profile or cache state. Two launch variants exist: a
//! constrained "packaged" one for the Lambda image and a looser "local" one
//! for developer machines, selected by `BrowserConfig::local`.

use chromiumoxide::browser::{Browser, BrowserConfig as ChromeConfig};
use futures::StreamExt;
use tempfile::TempDir;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use crate::config::BrowserConfig;
use crate::error::{AppError, Result};

/// A running browser session with a guaranteed-release lifecycle.
///
/// The session owns the browser process, the CDP event-handler task, and the
/// scratch directories. Prefer the consuming [`close`](Self::close) for
/// teardown; the `Drop` fallback spawns best-effort cleanup so early-return
/// paths never leak a browser process. Release happens exactly once either
/// way: `close` and `Drop` both take the browser out of the same slot.
pub struct BrowserSession {
    browser: Option<Browser>,
    handler_task: JoinHandle<()>,
    runtime: tokio::runtime::Handle,
    _scratch: Vec<TempDir>,
}

impl BrowserSession {
    /// Launch a browser using the variant selected by the settings.
    ///
    /// A launch failure propagates to the caller; there is nothing to release
    /// at that point.
    pub async fn launch(settings: &BrowserConfig) -> Result<Self> {
        let (config, scratch) = if settings.local {
            local_config(settings)?
        } else {
            packaged_config(settings)?
        };

        let (browser, mut handler) = Browser::launch(config).await.map_err(AppError::browser)?;

        // The CDP connection is only serviced while this stream is polled.
        let handler_task = tokio::spawn(async move {
            while let Some(event) = handler.next().await {
                if event.is_err() {
                    break;
                }
            }
        });

        info!(
            variant = if settings.local { "local" } else { "packaged" },
            "Browser session started"
        );

        Ok(Self {
            browser: Some(browser),
            handler_task,
            runtime: tokio::runtime::Handle::current(),
            _scratch: scratch,
        })
    }

    /// Access the underlying browser handle.
    pub fn browser(&self) -> &Browser {
        self.browser
            .as_ref()
            .expect("BrowserSession: browser already released")
    }

    /// Close the session, consuming the guard.
    ///
    /// Close failures are logged, not propagated: by the time teardown runs
    /// the pipeline outcome is already decided and must not be masked.
    pub async fn close(mut self) {
        if let Some(mut browser) = self.browser.take() {
            if let Err(e) = browser.close().await {
                warn!("Failed to close browser: {e}");
            }
            if let Err(e) = browser.wait().await {
                warn!("Browser did not exit cleanly: {e}");
            }
            info!("Browser session closed");
        }
        self.handler_task.abort();
    }
}

impl Drop for BrowserSession {
    fn drop(&mut self) {
        if let Some(mut browser) = self.browser.take() {
            // Cleanup cannot be awaited from Drop; hand it to the runtime
            // handle captured at launch. The handler task must keep polling
            // until the close command is delivered; it ends on its own once
            // the browser connection drops, and the JoinHandle detaches.
            self.runtime.spawn(async move {
                if let Err(e) = browser.close().await {
                    warn!("Browser drop cleanup failed: {e}");
                } else {
                    debug!("Browser drop cleanup succeeded");
                }
                let _ = browser.wait().await;
            });
        }
    }
}

/// Launch configuration for the packaged (Lambda image) environment.
///
/// Fixed binary path, reduced resource footprint, and three isolated scratch
/// directories for profile, data, and disk cache.
fn packaged_config(settings: &BrowserConfig) -> Result<(ChromeConfig, Vec<TempDir>)> {
    let user_data = tempfile::tempdir()?;
    let data_path = tempfile::tempdir()?;
    let disk_cache = tempfile::tempdir()?;

    let mut builder = ChromeConfig::builder()
        .no_sandbox()
        .window_size(1280, 1696)
        .user_data_dir(user_data.path())
        .args([
            "--disable-gpu",
            "--single-process",
            "--disable-dev-shm-usage",
            "--disable-dev-tools",
            "--no-zygote",
        ])
        .arg(format!("--data-path={}", data_path.path().display()))
        .arg(format!("--disk-cache-dir={}", disk_cache.path().display()));

    if let Some(binary) = &settings.binary {
        builder = builder.chrome_executable(binary);
    }

    let config = builder.build().map_err(AppError::Browser)?;
    Ok((config, vec![user_data, data_path, disk_cache]))
}

/// Launch configuration for a developer machine.
///
/// One scratch directory shared for profile and cache; the binary path is
/// optional and falls back to a PATH lookup.
fn local_config(settings: &BrowserConfig) -> Result<(ChromeConfig, Vec<TempDir>)> {
    let scratch = tempfile::tempdir()?;

    let mut builder = ChromeConfig::builder()
        .no_sandbox()
        .window_size(1280, 1696)
        .user_data_dir(scratch.path())
        .args(["--disable-gpu", "--disable-dev-shm-usage"])
        .arg(format!("--disk-cache-dir={}", scratch.path().display()));

    if let Some(binary) = &settings.binary {
        builder = builder.chrome_executable(binary);
    }

    let config = builder.build().map_err(AppError::Browser)?;
    Ok((config, vec![scratch]))
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use super::*;

    fn settings(local: bool) -> BrowserConfig {
        BrowserConfig {
            binary: Some(PathBuf::from("/opt/chrome/chrome")),
            local,
        }
    }

    #[test]
    fn test_packaged_config_isolates_three_scratch_dirs() {
        let (_, scratch) = packaged_config(&settings(false)).unwrap();
        assert_eq!(scratch.len(), 3);

        let paths: Vec<_> = scratch.iter().map(|d| d.path().to_path_buf()).collect();
        assert!(paths.iter().all(|p| p.is_dir()));
        assert_ne!(paths[0], paths[1]);
        assert_ne!(paths[1], paths[2]);
    }

    #[test]
    fn test_local_config_uses_single_scratch_dir() {
        let (_, scratch) = local_config(&settings(true)).unwrap();
        assert_eq!(scratch.len(), 1);
        assert!(scratch[0].path().is_dir());
    }

    #[test]
    fn test_runs_get_distinct_scratch_dirs() {
        let (_, first) = packaged_config(&settings(false)).unwrap();
        let (_, second) = packaged_config(&settings(false)).unwrap();
        assert_ne!(first[0].path(), second[0].path());
    }
}
