//! Payment settlement: the atomic purchase path. Validates the listing and
//! the payment, moves the funds, then records the receipt and sales count.
//!
//! Ordering matters: every check runs before the transfer and every write
//! happens after it. An error return aborts the invocation frame, so a
//! failed transfer leaves no receipt behind and a failed write reverts the
//! transfer with it. Settlement is all-or-nothing.

use soroban_sdk::{log, token, Address, Env};

use crate::types::{Error, PurchaseReceipt};
use crate::{listings, purchases};

/// Settles a purchase of `item_id` by `buyer` paying `amount_sent`.
///
/// The amount must equal the listing price exactly. No change is given and
/// no partial payment accepted; a stale client-side price shows up here as
/// `PriceMismatch` rather than as an over- or under-payment.
pub fn settle(
    env: &Env,
    payment_token: &Address,
    buyer: &Address,
    item_id: u64,
    amount_sent: i128,
) -> Result<PurchaseReceipt, Error> {
    let listing = listings::get(env, item_id)?;

    // Checked in the same frame as the transfer, so a delist can never
    // slip in between.
    if !listing.active {
        return Err(Error::Inactive);
    }
    if amount_sent != listing.price {
        return Err(Error::PriceMismatch);
    }
    if purchases::has_purchased(env, buyer, item_id) {
        return Err(Error::AlreadyPurchased);
    }

    let client = token::Client::new(env, payment_token);
    match client.try_transfer(buyer, &listing.seller, &amount_sent) {
        Ok(_) => {}
        Err(_) => {
            log!(env, "settlement transfer of {} rejected", amount_sent);
            return Err(Error::TransferFailed);
        }
    }

    let receipt = purchases::record_purchase(env, buyer, item_id, amount_sent)?;
    listings::increment_sales(env, item_id)?;

    Ok(receipt)
}
