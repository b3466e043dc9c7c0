// Interaction guards shared by the booking form and the staff views.
//
// RequestGuard hands out monotonically increasing tickets. A completion may only touch
// display state while its ticket is still the latest one issued.
//
// BusyFlag marks a submission in flight. The returned BusyGuard clears the flag when it
// is dropped, so every exit path of a submission re-enables the form.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ticket(u64);

#[derive(Debug, Default)]
pub struct RequestGuard {
    generation: AtomicU64,
}

impl RequestGuard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn issue(&self) -> Ticket {
        Ticket(self.generation.fetch_add(1, Ordering::SeqCst) + 1)
    }

    pub fn is_current(&self, ticket: Ticket) -> bool {
        self.generation.load(Ordering::SeqCst) == ticket.0
    }

    /// Makes every outstanding ticket stale, e.g. when the user navigates away.
    pub fn invalidate(&self) {
        self.generation.fetch_add(1, Ordering::SeqCst);
    }
}

#[derive(Debug, Default, Clone)]
pub struct BusyFlag {
    busy: Arc<AtomicBool>,
}

impl BusyFlag {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_busy(&self) -> bool {
        self.busy.load(Ordering::SeqCst)
    }

    /// Returns `None` while another submission still holds the flag.
    pub fn try_acquire(&self) -> Option<BusyGuard> {
        self.busy
            .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .ok()
            .map(|_| BusyGuard {
                busy: self.busy.clone(),
            })
    }
}

#[derive(Debug)]
pub struct BusyGuard {
    busy: Arc<AtomicBool>,
}

impl Drop for BusyGuard {
    fn drop(&mut self) {
        self.busy.store(false, Ordering::SeqCst);
    }
}
