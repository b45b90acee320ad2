//! Cosmetic background task that keeps a host navigation label in sync
//! with the current language. Purely presentational: it shares no state
//! with the data store and the panel works identically without it.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread::{self, JoinHandle};
use std::time::Duration;

/// Display label for the navigation entry in the given language.
pub fn nav_label(lang: &str) -> &'static str {
    match crate::i18n::resolve_lang_key(lang) {
        "zh-Hant" => "記事本",
        "zh-Hans" => "记事本",
        _ => "Note Record",
    }
}

/// Periodically applies the label via an idempotent callback until stopped.
pub struct NavLabelTask {
    stop: Arc<AtomicBool>,
    handle: Option<JoinHandle<()>>,
}

impl NavLabelTask {
    /// Spawn the patch loop. `lang` is sampled on every tick so language
    /// switches are picked up; `apply` must be idempotent because the same
    /// label is re-applied on every tick.
    pub fn start(
        interval: Duration,
        lang: impl Fn() -> String + Send + 'static,
        apply: impl Fn(&str) + Send + 'static,
    ) -> Self {
        let stop = Arc::new(AtomicBool::new(false));
        let stop_flag = Arc::clone(&stop);
        let handle = thread::spawn(move || {
            while !stop_flag.load(Ordering::Relaxed) {
                apply(nav_label(&lang()));
                thread::sleep(interval);
            }
        });
        Self { stop, handle: Some(handle) }
    }

    pub fn stop(&mut self) {
        self.stop.store(true, Ordering::Relaxed);
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
        }
    }
}

impl Drop for NavLabelTask {
    fn drop(&mut self) {
        self.stop();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    #[test]
    fn test_label_per_language() {
        assert_eq!(nav_label("en"), "Note Record");
        assert_eq!(nav_label("zh-TW"), "記事本");
        assert_eq!(nav_label("zh-CN"), "记事本");
        assert_eq!(nav_label("fr"), "Note Record");
    }

    #[test]
    fn test_task_applies_label_and_stops() {
        let seen: Arc<Mutex<Vec<String>>> = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&seen);
        let mut task = NavLabelTask::start(
            Duration::from_millis(1),
            || "zh-HK".to_string(),
            move |label| sink.lock().unwrap().push(label.to_string()),
        );
        // First tick happens before the first sleep.
        thread::sleep(Duration::from_millis(20));
        task.stop();

        let seen = seen.lock().unwrap();
        assert!(!seen.is_empty());
        assert!(seen.iter().all(|l| l == "記事本"));
    }
}
