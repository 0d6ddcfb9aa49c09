//! Listing registry: the single owner of the listing map and the item id
//! counter. All writes to listing records go through this module.

use soroban_sdk::{symbol_short, Address, Env, Map, String, Symbol, Vec};

use crate::types::{Error, ItemMetadata, Listing};

// Map of all listings keyed by item id (instance storage)
const LISTINGS: Symbol = symbol_short!("LISTINGS");
// Next id to assign; ids 0..ITEMCNT are assigned and never reused
const ITEM_COUNT: Symbol = symbol_short!("ITEMCNT");

fn all(env: &Env) -> Map<u64, Listing> {
    env.storage()
        .instance()
        .get(&LISTINGS)
        .unwrap_or_else(|| Map::new(env))
}

fn write(env: &Env, listings: &Map<u64, Listing>) {
    env.storage().instance().set(&LISTINGS, listings);
}

/// Number of ids assigned so far.
pub fn count(env: &Env) -> u64 {
    env.storage().instance().get(&ITEM_COUNT).unwrap_or(0)
}

/// Appends a new active listing and returns its id.
///
/// The price must be strictly positive; any marketplace-level minimum
/// beyond that is caller policy. Ids are assigned from a monotonic counter
/// so browse ordering stays stable forever.
pub fn create(
    env: &Env,
    seller: Address,
    cid: String,
    price: i128,
    metadata: ItemMetadata,
) -> Result<u64, Error> {
    if price <= 0 {
        return Err(Error::InvalidAmount);
    }

    let id = count(env);
    let listing = Listing {
        id,
        seller,
        cid,
        price,
        metadata,
        sales_count: 0,
        active: true,
        listed_at: env.ledger().timestamp(),
    };

    let mut listings = all(env);
    listings.set(id, listing);
    write(env, &listings);
    env.storage().instance().set(&ITEM_COUNT, &(id + 1));

    Ok(id)
}

/// Looks up a listing by id, active or not.
pub fn get(env: &Env, item_id: u64) -> Result<Listing, Error> {
    all(env).get(item_id).ok_or(Error::NotFound)
}

/// Retires a listing. One-way: a delisted id can never become active again.
///
/// Only the listing's seller may retire it, and only once. Returns the
/// updated record so the caller can surface the cids that are now eligible
/// for unpinning.
pub fn set_inactive(env: &Env, seller: &Address, item_id: u64) -> Result<Listing, Error> {
    let mut listings = all(env);
    let mut listing = listings.get(item_id).ok_or(Error::NotFound)?;

    if listing.seller != *seller {
        return Err(Error::Unauthorized);
    }
    if !listing.active {
        return Err(Error::AlreadyInactive);
    }

    listing.active = false;
    listings.set(item_id, listing.clone());
    write(env, &listings);

    Ok(listing)
}

/// Bumps the sales counter by one. Called from settlement only, after the
/// payment has gone through.
pub fn increment_sales(env: &Env, item_id: u64) -> Result<(), Error> {
    let mut listings = all(env);
    let mut listing = listings.get(item_id).ok_or(Error::NotFound)?;

    listing.sales_count += 1;
    listings.set(item_id, listing);
    write(env, &listings);

    Ok(())
}

/// All currently active listings in ascending id order.
///
/// Soroban maps iterate in key order, so repeated calls with no intervening
/// mutation return identical sequences.
pub fn active(env: &Env) -> Vec<Listing> {
    let mut out = Vec::new(env);
    for (_, listing) in all(env).iter() {
        if listing.active {
            out.push_back(listing);
        }
    }
    out
}
