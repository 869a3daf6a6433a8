use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

/// Server-assigned identifier. Never produced client-side.
pub type VendorId = u64;

/// Closed set of vendor categories accepted by the backend.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, Display, EnumIter, EnumString,
)]
pub enum Category {
    #[default]
    Utensils,
    Packaging,
    Containers,
}

impl Category {
    /// The next category in declaration order, wrapping around.
    pub fn next(self) -> Self {
        match self {
            Self::Utensils => Self::Packaging,
            Self::Packaging => Self::Containers,
            Self::Containers => Self::Utensils,
        }
    }

    pub fn prev(self) -> Self {
        match self {
            Self::Utensils => Self::Containers,
            Self::Packaging => Self::Utensils,
            Self::Containers => Self::Packaging,
        }
    }
}

/// A vendor record as stored by the backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Vendor {
    pub id: VendorId,
    pub name: String,
    pub contact: String,
    pub email: String,
    pub phone: String,
    pub address: String,
    pub category: Category,
}

impl Vendor {
    /// Rebuilds the full record from a draft, e.g. for a whole-record PUT.
    pub fn from_draft(id: VendorId, draft: VendorDraft) -> Self {
        Self {
            id,
            name: draft.name,
            contact: draft.contact,
            email: draft.email,
            phone: draft.phone,
            address: draft.address,
            category: draft.category,
        }
    }

    pub fn draft(&self) -> VendorDraft {
        VendorDraft {
            name: self.name.clone(),
            contact: self.contact.clone(),
            email: self.email.clone(),
            phone: self.phone.clone(),
            address: self.address.clone(),
            category: self.category,
        }
    }
}

/// A vendor without its `id`, as submitted on create and edited in forms.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VendorDraft {
    pub name: String,
    pub contact: String,
    pub email: String,
    pub phone: String,
    pub address: String,
    pub category: Category,
}

/// The editable attributes of a vendor, in form order.
///
/// Used as the key of validation error maps and for form focus traversal.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumIter,
)]
pub enum Field {
    Name,
    Contact,
    Email,
    Phone,
    Address,
    Category,
}

impl VendorDraft {
    /// Text content of a field. `Category` renders through its enum name.
    pub fn field(&self, field: Field) -> String {
        match field {
            Field::Name => self.name.clone(),
            Field::Contact => self.contact.clone(),
            Field::Email => self.email.clone(),
            Field::Phone => self.phone.clone(),
            Field::Address => self.address.clone(),
            Field::Category => self.category.to_string(),
        }
    }

    pub fn set_field(&mut self, field: Field, value: String) {
        match field {
            Field::Name => self.name = value,
            Field::Contact => self.contact = value,
            Field::Email => self.email = value,
            Field::Phone => self.phone = value,
            Field::Address => self.address = value,
            // Category is a closed set and only changes by cycling.
            Field::Category => {}
        }
    }
}
