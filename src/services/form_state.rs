//! Transient form selections driving the generate flow

use serde::{Deserialize, Serialize};

use super::generator::GenerateRequest;
use crate::storage::{DimensionKind, DimensionSnapshot};

/// Current selections of one session; never persisted
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormState {
    pub url: String,
    pub source: Option<String>,
    pub medium: Option<String>,
    pub campaign: Option<String>,
    pub title: String,
}

fn non_empty(value: &str) -> Option<String> {
    let value = value.trim();
    (!value.is_empty()).then(|| value.to_string())
}

impl FormState {
    /// Empty form with the default campaign pre-selected
    pub fn from_snapshot(snapshot: &DimensionSnapshot) -> Self {
        Self {
            campaign: snapshot.default_campaign().map(|c| c.name.clone()),
            ..Self::default()
        }
    }

    pub fn select(&mut self, kind: DimensionKind, name: &str) {
        let value = non_empty(name);
        match kind {
            DimensionKind::Source => self.source = value,
            DimensionKind::Medium => self.medium = value,
            DimensionKind::Campaign => self.campaign = value,
        }
    }

    pub fn selected(&self, kind: DimensionKind) -> Option<&str> {
        match kind {
            DimensionKind::Source => self.source.as_deref(),
            DimensionKind::Medium => self.medium.as_deref(),
            DimensionKind::Campaign => self.campaign.as_deref(),
        }
    }

    /// Overlay an incoming request
    ///
    /// Url and source are always taken. Optional fields only replace the
    /// current selection when present; an empty string clears it.
    pub fn apply_request(&mut self, req: &GenerateRequest) {
        self.url = req.url.trim().to_string();
        self.source = non_empty(&req.source);
        if let Some(medium) = &req.medium {
            self.medium = non_empty(medium);
        }
        if let Some(campaign) = &req.campaign {
            self.campaign = non_empty(campaign);
        }
        if let Some(title) = &req.title {
            self.title = title.clone();
        }
    }

    /// Re-validate selections after the dimension lists changed
    ///
    /// A removed source or medium is cleared; a removed campaign falls back
    /// to the default campaign.
    pub fn apply_snapshot(&mut self, snapshot: &DimensionSnapshot) {
        if let Some(source) = &self.source
            && !snapshot.contains(DimensionKind::Source, source)
        {
            self.source = None;
        }
        if let Some(medium) = &self.medium
            && !snapshot.contains(DimensionKind::Medium, medium)
        {
            self.medium = None;
        }
        if let Some(campaign) = &self.campaign
            && !snapshot.contains(DimensionKind::Campaign, campaign)
        {
            self.campaign = snapshot.default_campaign().map(|c| c.name.clone());
        }
    }

    pub fn to_request(&self) -> GenerateRequest {
        GenerateRequest {
            url: self.url.clone(),
            source: self.source.clone().unwrap_or_default(),
            medium: self.medium.clone(),
            campaign: self.campaign.clone(),
            title: non_empty(&self.title).map(|_| self.title.clone()),
        }
    }
}
