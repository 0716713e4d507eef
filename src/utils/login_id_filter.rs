use autoscale_cuckoo_filter::CuckooFilter;
use std::sync::{PoisonError, RwLock};

/// Expected capacity and false-positive rate.
/// Tune these based on real roster size.
const FILTER_CAPACITY: usize = 10_000;
const FALSE_POSITIVE_RATE: f64 = 0.001;

/// Probabilistic set of known login IDs. A miss means the ID is certainly
/// unknown; a hit still needs a roster lookup.
pub struct LoginIdFilter {
    filter: RwLock<CuckooFilter<String>>,
}

#[inline]
fn normalize(login_id: &str) -> String {
    login_id.trim().to_lowercase()
}

impl Default for LoginIdFilter {
    fn default() -> Self {
        Self::new()
    }
}

impl LoginIdFilter {
    pub fn new() -> Self {
        Self {
            filter: RwLock::new(CuckooFilter::new(FILTER_CAPACITY, FALSE_POSITIVE_RATE)),
        }
    }

    /// Check if a login ID might exist (false positives possible)
    pub fn might_exist(&self, login_id: &str) -> bool {
        let login_id = normalize(login_id);
        self.filter
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .contains(&login_id)
    }

    /// Load every login ID under a single write lock.
    pub fn warmup<'a>(&self, login_ids: impl IntoIterator<Item = &'a str>) -> usize {
        let mut filter = self.filter.write().unwrap_or_else(PoisonError::into_inner);

        let mut total = 0usize;
        for login_id in login_ids {
            filter.add(&normalize(login_id));
            total += 1;
        }

        log::info!("Login ID filter warmup complete: {} accounts", total);
        total
    }
}
