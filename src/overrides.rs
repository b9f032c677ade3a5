use log::debug;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::future::Future;

pub type CategoryId = i32;

/// Library sort and filter options stored per category on the server.
/// `None` means the option was never set for that category.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryMetadata {
    pub sort_desc: Option<bool>,
    pub sort_by: Option<String>,
    pub has_downloaded_chapters: Option<bool>,
    pub has_bookmarked_chapters: Option<bool>,
    pub has_unread_chapters: Option<bool>,
    pub has_read_chapters: Option<bool>,
    pub has_duplicate_chapters: Option<bool>,
    #[serde(default)]
    pub has_tracker_binding: BTreeMap<i32, bool>,
    #[serde(default)]
    pub has_status: BTreeMap<String, bool>,
}

/// A partial [`CategoryMetadata`]. An outer `None` leaves the field alone,
/// `Some(None)` overrides it to "unset".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CategoryMetadataPatch {
    pub sort_desc: Option<Option<bool>>,
    pub sort_by: Option<Option<String>>,
    pub has_downloaded_chapters: Option<Option<bool>>,
    pub has_bookmarked_chapters: Option<Option<bool>>,
    pub has_unread_chapters: Option<Option<bool>>,
    pub has_read_chapters: Option<Option<bool>>,
    pub has_duplicate_chapters: Option<Option<bool>>,
    pub has_tracker_binding: Option<BTreeMap<i32, bool>>,
    pub has_status: Option<BTreeMap<String, bool>>,
}

macro_rules! each_field {
    ($m:ident) => {
        $m!(sort_desc);
        $m!(sort_by);
        $m!(has_downloaded_chapters);
        $m!(has_bookmarked_chapters);
        $m!(has_unread_chapters);
        $m!(has_read_chapters);
        $m!(has_duplicate_chapters);
        $m!(has_tracker_binding);
        $m!(has_status);
    };
}

impl CategoryMetadataPatch {
    /// Fields set in `other` win.
    pub fn merge(&mut self, other: &CategoryMetadataPatch) {
        macro_rules! take {
            ($f:ident) => {
                if let Some(value) = &other.$f {
                    self.$f = Some(value.clone());
                }
            };
        }
        each_field!(take);
    }

    pub fn apply_to(&self, metadata: &mut CategoryMetadata) {
        macro_rules! apply {
            ($f:ident) => {
                if let Some(value) = &self.$f {
                    metadata.$f = value.clone();
                }
            };
        }
        each_field!(apply);
    }

    /// A patch touching the same fields as `self`, holding the values they
    /// have in `metadata`. Applying it undoes `self`.
    pub fn snapshot(&self, metadata: &CategoryMetadata) -> CategoryMetadataPatch {
        let mut out = CategoryMetadataPatch::default();
        macro_rules! capture {
            ($f:ident) => {
                if self.$f.is_some() {
                    out.$f = Some(metadata.$f.clone());
                }
            };
        }
        each_field!(capture);
        out
    }
}

type Listener = Box<dyn FnMut(CategoryId)>;

/// Local overrides layered on top of server metadata, so a changed sort or
/// filter shows up before the server round trip completes.
#[derive(Default)]
pub struct CategoryMetadataOverrides {
    overrides_by_id: HashMap<CategoryId, CategoryMetadataPatch>,
    listeners: Vec<(usize, Listener)>,
    next_id: usize,
}

impl CategoryMetadataOverrides {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_overrides(&mut self, category_id: CategoryId, patch: &CategoryMetadataPatch) {
        debug!("Overriding metadata of category {}", category_id);
        self.overrides_by_id
            .entry(category_id)
            .or_default()
            .merge(patch);
        self.notify(category_id);
    }

    pub fn clear_overrides(&mut self, category_id: CategoryId) {
        if self.overrides_by_id.remove(&category_id).is_some() {
            debug!("Cleared metadata overrides of category {}", category_id);
            self.notify(category_id);
        }
    }

    pub fn overrides(&self, category_id: CategoryId) -> Option<&CategoryMetadataPatch> {
        self.overrides_by_id.get(&category_id)
    }

    pub fn metadata_for(&self, category_id: CategoryId, base: &CategoryMetadata) -> CategoryMetadata {
        let mut metadata = base.clone();
        if let Some(patch) = self.overrides(category_id) {
            patch.apply_to(&mut metadata);
        }
        metadata
    }

    /// Applies `patch` right away and awaits `request`. If the request fails
    /// the touched fields go back to their previous values.
    pub async fn update_optimistically<F, E>(
        &mut self,
        category_id: CategoryId,
        base: &CategoryMetadata,
        patch: CategoryMetadataPatch,
        request: F,
    ) -> Result<(), E>
    where
        F: Future<Output = Result<(), E>>,
    {
        let previous = patch.snapshot(&self.metadata_for(category_id, base));
        self.set_overrides(category_id, &patch);

        let result = request.await;
        if result.is_err() {
            debug!("Metadata update of category {} failed, rolling back", category_id);
            self.set_overrides(category_id, &previous);
        }
        result
    }

    pub fn subscribe<F>(&mut self, listener: F) -> usize
    where
        F: FnMut(CategoryId) + 'static,
    {
        let id = self.next_id;
        self.next_id += 1;
        self.listeners.push((id, Box::new(listener)));
        id
    }

    pub fn unsubscribe(&mut self, id: usize) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(listener_id, _)| *listener_id != id);
        self.listeners.len() != before
    }

    fn notify(&mut self, category_id: CategoryId) {
        for (_, listener) in self.listeners.iter_mut() {
            listener(category_id);
        }
    }
}
