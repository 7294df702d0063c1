//! Owned DOM regions.
//!
//! Each report kind writes to exactly one region; the webview shell
//! swaps a region's fragment into its container whenever the region
//! changes. Because regions are disjoint, concurrent report loads can
//! complete in any order without touching each other's output.

use std::sync::Arc;

use tokio::sync::Mutex;

/// Lifecycle of a region's content.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegionStatus {
    /// Nothing rendered yet.
    Empty,
    /// A load is in flight; the shell shows the spinner.
    Loading,
    /// Holding rendered report content (possibly a no-data placeholder).
    Ready,
    /// Holding an error placeholder.
    Failed,
}

/// One dashboard container and its current fragment.
///
/// Rendering always replaces the whole fragment, so re-rendering with
/// new data leaves no residue from the previous payload.
#[derive(Debug)]
pub struct Region {
    name: &'static str,
    status: RegionStatus,
    html: String,
}

impl Region {
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            status: RegionStatus::Empty,
            html: String::new(),
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn status(&self) -> RegionStatus {
        self.status
    }

    pub fn html(&self) -> &str {
        &self.html
    }

    /// Marks the region as loading without discarding current content;
    /// the spinner overlays whatever is shown.
    pub fn set_loading(&mut self) {
        self.status = RegionStatus::Loading;
    }

    /// Replaces the fragment with rendered report content.
    pub fn render(&mut self, html: String) {
        self.html = html;
        self.status = RegionStatus::Ready;
    }

    /// Replaces the fragment with an error placeholder.
    pub fn fail(&mut self, placeholder: String) {
        self.html = placeholder;
        self.status = RegionStatus::Failed;
    }

    pub fn clear(&mut self) {
        self.html.clear();
        self.status = RegionStatus::Empty;
    }
}

/// Regions are shared between the controller and the embedding shell.
pub type SharedRegion = Arc<Mutex<Region>>;

pub fn shared_region(name: &'static str) -> SharedRegion {
    Arc::new(Mutex::new(Region::new(name)))
}
