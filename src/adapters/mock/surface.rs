//! Recording overlay surface for testing.

use std::sync::Mutex;

use crate::models::FormValues;
use crate::traits::OverlaySurface;

/// Surface that records every `set_open` call.
#[derive(Debug, Default)]
pub struct MockSurface {
    open_calls: Mutex<Vec<bool>>,
    form: Mutex<Option<FormValues>>,
}

impl MockSurface {
    pub fn new() -> Self {
        Self::default()
    }

    /// Surface hosting a form with the given values.
    pub fn with_form(values: FormValues) -> Self {
        Self {
            open_calls: Mutex::new(Vec::new()),
            form: Mutex::new(Some(values)),
        }
    }

    /// Every `set_open` argument, in call order.
    pub fn open_calls(&self) -> Vec<bool> {
        self.open_calls.lock().unwrap().clone()
    }

    /// Number of `set_open(false)` calls.
    pub fn close_count(&self) -> usize {
        self.open_calls.lock().unwrap().iter().filter(|open| !**open).count()
    }

    pub fn set_form(&self, values: Option<FormValues>) {
        *self.form.lock().unwrap() = values;
    }
}

impl OverlaySurface for MockSurface {
    fn set_open(&self, open: bool) {
        self.open_calls.lock().unwrap().push(open);
    }

    fn form(&self) -> Option<FormValues> {
        self.form.lock().unwrap().clone()
    }
}
