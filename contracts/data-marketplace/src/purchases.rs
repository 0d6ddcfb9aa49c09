//! Purchase ledger: the single owner of the receipt map and the per-buyer
//! purchase index. Receipts are append-only and never deleted.

use soroban_sdk::{symbol_short, Address, Env, Map, Symbol, Vec};

use crate::types::{Error, PurchaseReceipt};

// Receipts keyed by the unique (buyer, item id) pair (instance storage)
const RECEIPTS: Symbol = symbol_short!("RECEIPTS");
// Per-buyer item ids in purchase order, kept alongside the receipt map so
// inventory reads stay a single lookup
const BUYER_INDEX: Symbol = symbol_short!("BUYERIDX");

fn receipts(env: &Env) -> Map<(Address, u64), PurchaseReceipt> {
    env.storage()
        .instance()
        .get(&RECEIPTS)
        .unwrap_or_else(|| Map::new(env))
}

fn buyer_index(env: &Env) -> Map<Address, Vec<u64>> {
    env.storage()
        .instance()
        .get(&BUYER_INDEX)
        .unwrap_or_else(|| Map::new(env))
}

/// Whether a receipt exists for the pair. False for unknown pairs, never
/// an error.
pub fn has_purchased(env: &Env, buyer: &Address, item_id: u64) -> bool {
    receipts(env).contains_key((buyer.clone(), item_id))
}

/// Writes the receipt for a settled purchase and appends the item to the
/// buyer's inventory. At most one receipt per (buyer, item) pair.
pub fn record_purchase(
    env: &Env,
    buyer: &Address,
    item_id: u64,
    price_paid: i128,
) -> Result<PurchaseReceipt, Error> {
    let mut receipts_map = receipts(env);
    let key = (buyer.clone(), item_id);
    if receipts_map.contains_key(key.clone()) {
        return Err(Error::AlreadyPurchased);
    }

    let receipt = PurchaseReceipt {
        buyer: buyer.clone(),
        item_id,
        price_paid,
        timestamp: env.ledger().timestamp(),
    };
    receipts_map.set(key, receipt.clone());
    env.storage().instance().set(&RECEIPTS, &receipts_map);

    let mut index = buyer_index(env);
    let mut owned = index
        .get(buyer.clone())
        .unwrap_or_else(|| Vec::new(env));
    owned.push_back(item_id);
    index.set(buyer.clone(), owned);
    env.storage().instance().set(&BUYER_INDEX, &index);

    Ok(receipt)
}

/// Every item the buyer has ever purchased, in purchase order.
pub fn purchases_of(env: &Env, buyer: &Address) -> Vec<u64> {
    buyer_index(env)
        .get(buyer.clone())
        .unwrap_or_else(|| Vec::new(env))
}

/// The receipt for a specific purchase.
pub fn receipt(env: &Env, buyer: &Address, item_id: u64) -> Result<PurchaseReceipt, Error> {
    receipts(env)
        .get((buyer.clone(), item_id))
        .ok_or(Error::NotFound)
}
