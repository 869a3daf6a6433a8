use serde::{Deserialize, Serialize};
use strum::Display;

use crate::query::Column;
use crate::vendor::{Vendor, VendorDraft, VendorId};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display)]
pub enum Severity {
    Success,
    Error,
    Info,
}

/// A transient, auto-dismissing user-facing message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Toast {
    pub message: String,
    pub severity: Severity,
}

impl Toast {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            severity: Severity::Success,
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            severity: Severity::Error,
        }
    }

    pub fn info(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            severity: Severity::Info,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Display, Deserialize)]
pub enum Action {
    Tick,
    Render,
    Resize(u16, u16),
    Suspend,
    Resume,
    Quit,
    Refresh,
    Error(String),
    Notify(Toast),

    // List navigation
    ScrollUp,
    ScrollDown,
    ScrollTop,
    ScrollBottom,
    NextPage,
    PrevPage,
    CyclePageSize,
    SortBy(Column),
    EnterSearch,
    LeaveSearch,
    CycleFilterField,
    Export,

    // Fetching
    VendorsLoaded(Vec<Vendor>),
    FetchFailed(String),

    // Add / Edit flows
    OpenAddForm,
    EditSelected,
    EditVendor(VendorId),
    VendorFetched(Box<Vendor>),
    EditTargetMissing,
    CloseForm,
    SubmitCreate(VendorDraft),
    VendorCreated(Box<Vendor>),
    SubmitUpdate(VendorId, VendorDraft),
    VendorUpdated(Box<Vendor>),
    SubmitFailed(String),

    // Delete flow
    DeleteSelected,
    EnterConfirm(VendorId),
    ConfirmDelete,
    CancelDelete,
    DeleteVendor(VendorId),
    VendorDeleted(VendorId),
    DeleteFailed(String),
}
