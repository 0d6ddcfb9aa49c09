/*!
 * Data Marketplace Ledger Contract
 *
 * The on-chain ledger behind a decentralized dataset marketplace. Sellers
 * list datasets that an off-chain pipeline has already pinned (the contract
 * holds only the content identifier), buyers purchase them at a fixed price
 * settled directly to the seller, and the contract keeps the authoritative
 * record of every listing and every purchase.
 *
 * Key properties:
 * - Sequential item ids, never reused; nothing is ever deleted
 * - One-way listing lifecycle: active until delisted, then permanently retired
 * - At most one purchase of an item per buyer, proven by an immutable receipt
 * - Exact-price settlement: the buyer pays precisely the stored price,
 *   transferred to the seller in the same atomic step that records the sale
 *
 * The pin/unpin pipeline is a collaborator, not a dependency: listing
 * happens after pinning, and delisting surfaces the cids to unpin through
 * the `delisted` event and the cid queries. A failed unpin can never roll
 * back a committed delist.
 */

#![no_std]

mod listings;
mod purchases;
mod settlement;
mod types;


use soroban_sdk::{
    contract, contractimpl, symbol_short, Address, Env, String, Symbol, Vec,
};

pub use types::{Error, ItemMetadata, Listing, PurchaseReceipt};

use types::{ADMIN_UPDATED, DELISTED, LISTED, PAUSE_SET, PURCHASED};

#[contract]
pub struct DataMarketplace;

// Storage keys owned by the facade. Configuration lives in persistent
// storage, the runtime pause flag in instance storage; listing and receipt
// data are owned by their modules.
const ADMIN: Symbol = symbol_short!("ADMIN");                // Admin address (persistent)
const PAYMENT_TOKEN: Symbol = symbol_short!("PAYTOKEN");     // Settlement token address (persistent)
const PAUSED: Symbol = symbol_short!("PAUSED");              // Marketplace pause state (instance)

#[contractimpl]
impl DataMarketplace {
    // ============================================================================================
    // LIFECYCLE
    // ============================================================================================

    /// Initializes the marketplace. Can only be called once.
    ///
    /// # Arguments
    /// * `admin` - Address holding administrative control (pause, handover)
    /// * `payment_token` - Token contract used to settle purchases
    ///
    /// # Errors
    /// - `AlreadyInitialized`: on any call after the first
    pub fn initialize(env: Env, admin: Address, payment_token: Address) -> Result<(), Error> {
        if env.storage().persistent().has(&ADMIN) {
            return Err(Error::AlreadyInitialized);
        }

        env.storage().persistent().set(&ADMIN, &admin);
        env.storage().persistent().set(&PAYMENT_TOKEN, &payment_token);
        env.storage().instance().set(&PAUSED, &false);

        Ok(())
    }

    // ============================================================================================
    // MARKETPLACE OPERATIONS
    // ============================================================================================

    /// Lists a dataset for sale and returns its newly assigned item id.
    ///
    /// The upload pipeline calls this after the payload is pinned; the
    /// contract stores the cid opaquely and never checks the payload
    /// exists. The listing starts active with a sales count of zero.
    ///
    /// # Arguments
    /// * `seller` - The listing account (must authorize the call)
    /// * `cid` - Content identifier of the pinned payload
    /// * `price` - Fixed price in the payment token's smallest unit, > 0
    /// * `metadata` - Immutable descriptive metadata from the pipeline
    ///
    /// # Errors
    /// - `InvalidAmount`: price is zero or negative
    /// - `ContractPaused` / `NotInitialized`
    pub fn list_data(
        env: Env,
        seller: Address,
        cid: String,
        price: i128,
        metadata: ItemMetadata,
    ) -> Result<u64, Error> {
        Self::require_init(&env)?;
        Self::require_unpaused(&env)?;
        seller.require_auth();

        let item_id = listings::create(&env, seller.clone(), cid, price, metadata)?;

        env.events().publish((LISTED, seller), (item_id, price));

        Ok(item_id)
    }

    /// Permanently retires a listing. There is no relist: a delisted item
    /// can never be bought again, and its id is never reissued.
    ///
    /// The `delisted` event carries the payload and logo cids so the
    /// collaborator can unpin them. The listing record itself stays
    /// readable forever.
    ///
    /// # Arguments
    /// * `seller` - The listing's seller (must authorize the call)
    /// * `item_id` - The listing to retire
    ///
    /// # Errors
    /// - `NotFound`: the id was never assigned
    /// - `Unauthorized`: caller is not the listing's seller
    /// - `AlreadyInactive`: the listing was already delisted
    /// - `ContractPaused` / `NotInitialized`
    pub fn delist_data(env: Env, seller: Address, item_id: u64) -> Result<(), Error> {
        Self::require_init(&env)?;
        Self::require_unpaused(&env)?;
        seller.require_auth();

        let listing = listings::set_inactive(&env, &seller, item_id)?;

        env.events().publish(
            (DELISTED, seller),
            (item_id, listing.cid, listing.metadata.logo_cid),
        );

        Ok(())
    }

    /// Purchases a listing, settling the payment to the seller.
    ///
    /// `amount_sent` must equal the listing price exactly; callers are
    /// expected to re-read the price from this contract immediately before
    /// buying rather than trust a cached value. The transfer, the receipt
    /// and the sales-count bump commit together or not at all.
    ///
    /// # Arguments
    /// * `buyer` - The purchasing account (must authorize the call and the
    ///   token transfer)
    /// * `item_id` - The listing to purchase
    /// * `amount_sent` - Payment amount, must equal the stored price
    ///
    /// # Errors
    /// - `NotFound`: the id was never assigned
    /// - `Inactive`: the listing was delisted
    /// - `PriceMismatch`: `amount_sent` differs from the stored price
    /// - `AlreadyPurchased`: the buyer already owns this item
    /// - `TransferFailed`: the token rejected the transfer; nothing recorded
    /// - `ContractPaused` / `NotInitialized`
    pub fn buy_data(env: Env, buyer: Address, item_id: u64, amount_sent: i128) -> Result<(), Error> {
        Self::require_init(&env)?;
        Self::require_unpaused(&env)?;
        buyer.require_auth();

        let payment_token: Address = env
            .storage()
            .persistent()
            .get(&PAYMENT_TOKEN)
            .ok_or(Error::NotInitialized)?;

        let receipt = settlement::settle(&env, &payment_token, &buyer, item_id, amount_sent)?;
        let listing = listings::get(&env, item_id)?;

        env.events().publish(
            (PURCHASED, buyer),
            (item_id, receipt.price_paid, listing.seller),
        );

        Ok(())
    }

    // ============================================================================================
    // QUERY FUNCTIONS (GETTERS)
    // ============================================================================================
    // Read-only projections of committed state. Never gated by the pause
    // flag, and still answering for delisted items so the unpin pipeline
    // and buyers' inventories keep working.

    /// Returns the full listing record, active or not.
    pub fn get_data_item(env: Env, item_id: u64) -> Result<Listing, Error> {
        listings::get(&env, item_id)
    }

    /// Returns a listing's immutable metadata.
    pub fn get_item_metadata(env: Env, item_id: u64) -> Result<ItemMetadata, Error> {
        Ok(listings::get(&env, item_id)?.metadata)
    }

    /// Returns a listing's payload content identifier.
    pub fn get_cid(env: Env, item_id: u64) -> Result<String, Error> {
        Ok(listings::get(&env, item_id)?.cid)
    }

    /// Returns whether a listing is active.
    pub fn get_status(env: Env, item_id: u64) -> Result<bool, Error> {
        Ok(listings::get(&env, item_id)?.active)
    }

    /// Number of ids assigned so far; assigned ids are `0..item_count`.
    pub fn item_count(env: Env) -> u64 {
        listings::count(&env)
    }

    /// All active listings in ascending id order, for browse pagination.
    pub fn list_active(env: Env) -> Vec<Listing> {
        listings::active(&env)
    }

    /// Every item the buyer has purchased, in purchase order. Empty for
    /// unknown buyers.
    pub fn get_user_purchases(env: Env, buyer: Address) -> Vec<u64> {
        purchases::purchases_of(&env, &buyer)
    }

    /// Whether the buyer holds a receipt for the item. The front end uses
    /// this to disable the buy action after a purchase.
    pub fn has_purchased(env: Env, buyer: Address, item_id: u64) -> bool {
        purchases::has_purchased(&env, &buyer, item_id)
    }

    /// Returns the receipt for a specific purchase.
    pub fn get_receipt(env: Env, buyer: Address, item_id: u64) -> Result<PurchaseReceipt, Error> {
        purchases::receipt(&env, &buyer, item_id)
    }

    /// Returns the admin address.
    pub fn get_admin(env: Env) -> Result<Address, Error> {
        env.storage().persistent().get(&ADMIN).ok_or(Error::NotInitialized)
    }

    /// Returns the token contract purchases settle in.
    pub fn get_payment_token(env: Env) -> Result<Address, Error> {
        env.storage()
            .persistent()
            .get(&PAYMENT_TOKEN)
            .ok_or(Error::NotInitialized)
    }

    /// Returns whether mutations are currently disabled.
    pub fn is_paused(env: Env) -> bool {
        env.storage().instance().get(&PAUSED).unwrap_or(false)
    }

    // ============================================================================================
    // ADMINISTRATIVE FUNCTIONS
    // ============================================================================================

    /// Disables list/delist/buy until `unpause`. Reads stay available.
    ///
    /// # Errors
    /// - `Unauthorized`: caller is not the admin
    pub fn pause(env: Env, caller: Address) -> Result<(), Error> {
        Self::require_admin(&env, &caller)?;

        env.storage().instance().set(&PAUSED, &true);
        env.events().publish((PAUSE_SET, caller), true);

        Ok(())
    }

    /// Re-enables mutations after a pause.
    ///
    /// # Errors
    /// - `Unauthorized`: caller is not the admin
    pub fn unpause(env: Env, caller: Address) -> Result<(), Error> {
        Self::require_admin(&env, &caller)?;

        env.storage().instance().set(&PAUSED, &false);
        env.events().publish((PAUSE_SET, caller), false);

        Ok(())
    }

    /// Hands administrative control to a new address. The new admin must
    /// also authorize the call, which rules out accidental handover to an
    /// address nobody controls.
    ///
    /// # Errors
    /// - `Unauthorized`: caller is not the current admin
    pub fn update_admin(env: Env, caller: Address, new_admin: Address) -> Result<(), Error> {
        Self::require_admin(&env, &caller)?;
        new_admin.require_auth();

        env.storage().persistent().set(&ADMIN, &new_admin);
        env.events().publish((ADMIN_UPDATED, caller), new_admin);

        Ok(())
    }

    // ============================================================================================
    // INTERNAL HELPERS
    // ============================================================================================

    fn require_init(env: &Env) -> Result<(), Error> {
        if !env.storage().persistent().has(&ADMIN) {
            return Err(Error::NotInitialized);
        }
        Ok(())
    }

    fn require_unpaused(env: &Env) -> Result<(), Error> {
        if env.storage().instance().get(&PAUSED).unwrap_or(false) {
            return Err(Error::ContractPaused);
        }
        Ok(())
    }

    fn require_admin(env: &Env, caller: &Address) -> Result<(), Error> {
        caller.require_auth();
        let admin: Address = env
            .storage()
            .persistent()
            .get(&ADMIN)
            .ok_or(Error::NotInitialized)?;
        if admin != *caller {
            return Err(Error::Unauthorized);
        }
        Ok(())
    }
}
