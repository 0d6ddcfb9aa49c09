/*!
 * Type definitions for the data marketplace ledger contract.
 *
 * Everything the contract stores or returns lives here: the listing record,
 * its immutable dataset metadata, the purchase receipt, the error taxonomy
 * and the event symbols published on committed mutations.
 */

use soroban_sdk::{contracterror, contracttype, symbol_short, Address, String, Symbol};

// ================================================================================================
// CORE DATA STRUCTURES
// ================================================================================================

/// Descriptive metadata attached to a listing at creation time.
///
/// Supplied by the upload pipeline together with the content identifier and
/// immutable afterwards. `created_at` is the pipeline's upload timestamp,
/// not a ledger timestamp; the contract does not interpret any of these
/// fields, it only stores and returns them.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ItemMetadata {
    /// Human-readable dataset title
    pub title: String,

    /// Free-form dataset description, also used by buyers as a download name
    pub description: String,

    /// Payload size in bytes, as reported by the upload pipeline
    pub file_size: u64,

    /// MIME type of the payload (e.g. "text/csv")
    pub file_type: String,

    /// Upload timestamp in seconds since epoch, supplied by the pipeline
    pub created_at: u64,

    /// Content identifier of an optional listing image, pinned alongside
    /// the payload and unpinned with it after a delist
    pub logo_cid: Option<String>,
}

/// A seller's offer of one dataset at a fixed price.
///
/// Identified by a sequentially assigned id that is never reused. The
/// record is append-only apart from two monotonic transitions: `active`
/// flips to false exactly once on delist and never back, and `sales_count`
/// grows by one per settled purchase. Nothing is ever deleted, so queries
/// on retired listings (cid, metadata) keep answering, which the off-chain
/// unpin collaborator relies on.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Listing {
    /// Sequentially assigned identifier, starting at 0
    pub id: u64,

    /// The account that listed the dataset and receives the sale proceeds
    pub seller: Address,

    /// Content identifier of the off-chain payload. The contract never
    /// checks that the payload exists; listing happens only after the
    /// pipeline has pinned it
    pub cid: String,

    /// Fixed price in the smallest unit of the payment token. Strictly
    /// positive; a purchase must pay exactly this amount
    pub price: i128,

    /// Immutable descriptive metadata
    pub metadata: ItemMetadata,

    /// Number of settled purchases of this listing
    pub sales_count: u64,

    /// False once delisted; inactive listings cannot be bought or browsed
    pub active: bool,

    /// Ledger timestamp at which the listing was created
    pub listed_at: u64,
}

/// Immutable proof that a buyer purchased an item.
///
/// Keyed by the `(buyer, item_id)` pair, which is unique: a buyer can
/// purchase a given item at most once. Existence of this record is the
/// sole source of truth for "has purchased".
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PurchaseReceipt {
    /// The purchasing account
    pub buyer: Address,

    /// The purchased listing's id
    pub item_id: u64,

    /// Amount transferred to the seller; equals the listing price at the
    /// time of purchase
    pub price_paid: i128,

    /// Ledger timestamp of the settlement
    pub timestamp: u64,
}

// ================================================================================================
// ERROR DEFINITIONS
// ================================================================================================

/// Failure kinds reported by the marketplace operations.
///
/// Every mutation either commits fully or reports exactly one of these;
/// nothing is retried internally. Codes are stable and grouped: lookup
/// failures first, then state-machine violations, then payment failures,
/// then lifecycle/administrative failures.
#[contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq, PartialOrd, Ord)]
#[repr(u32)]
pub enum Error {
    /// The item id has never been assigned, or no receipt exists for the
    /// addressed (buyer, item) pair
    NotFound = 1,

    /// Caller is not the listing's seller, or not the marketplace admin
    Unauthorized = 2,

    /// Delist of a listing that is already inactive
    AlreadyInactive = 3,

    /// Purchase attempt on a delisted listing
    Inactive = 4,

    /// Payment amount differs from the listing price. Exact match only;
    /// callers must re-read the price from this contract before buying
    PriceMismatch = 5,

    /// The buyer already holds a receipt for this item
    AlreadyPurchased = 6,

    /// Listing price is zero or negative
    InvalidAmount = 7,

    /// The payment token rejected the buyer-to-seller transfer; nothing
    /// was recorded
    TransferFailed = 8,

    /// Mutations are disabled while the marketplace is paused
    ContractPaused = 9,

    /// `initialize` was already called
    AlreadyInitialized = 10,

    /// Operation requires `initialize` to have been called first
    NotInitialized = 11,
}

// ================================================================================================
// EVENT CONSTANTS
// ================================================================================================
// Published on every committed mutation so off-chain indexers and the unpin
// pipeline can follow marketplace activity without polling.

/// A new listing was created.
/// Topics: (symbol, seller); data: (item_id, price)
pub const LISTED: Symbol = symbol_short!("listed");

/// A listing was retired by its seller.
/// Topics: (symbol, seller); data: (item_id, cid, logo_cid) so the
/// collaborator can unpin the payload and logo
pub const DELISTED: Symbol = symbol_short!("delisted");

/// A purchase settled.
/// Topics: (symbol, buyer); data: (item_id, price_paid, seller)
pub const PURCHASED: Symbol = symbol_short!("purchased");

/// Administrative control moved to a new address.
/// Topics: (symbol, old admin); data: new admin
pub const ADMIN_UPDATED: Symbol = symbol_short!("adm_upd");

/// The marketplace pause flag changed.
/// Topics: (symbol, admin); data: paused flag
pub const PAUSE_SET: Symbol = symbol_short!("pause_set");
