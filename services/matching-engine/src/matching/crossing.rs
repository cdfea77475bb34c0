//! Crossing detection logic
//!
//! Determines when a bid and ask can match based on price compatibility

use types::numeric::Price;
use types::order::Side;

/// Check if a bid and ask can match at given prices
///
/// For a buy order to match with a sell order the buy price must be
/// at or above the sell price.
pub fn can_match(bid_price: Price, ask_price: Price) -> bool {
    bid_price >= ask_price
}

/// Check if an incoming order can match against resting order
///
/// Returns true if the incoming order price crosses the resting order price
pub fn incoming_can_match(incoming_side: Side, incoming_price: Price, resting_price: Price) -> bool {
    match incoming_side {
        Side::BUY => can_match(incoming_price, resting_price), // Buy crosses sell if bid >= ask
        Side::SELL => can_match(resting_price, incoming_price), // Sell crosses buy if ask <= bid
    }
}

/// A book is crossed when the best bid reaches the best ask
pub fn is_crossed(best_bid: Option<Price>, best_ask: Option<Price>) -> bool {
    match (best_bid, best_ask) {
        (Some(bid), Some(ask)) => can_match(bid, ask),
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_can_match_crossing() {
        let bid = Price::from_u64(50000);
        let ask = Price::from_u64(49000);
        assert!(can_match(bid, ask), "Bid >= ask should match");
    }

    #[test]
    fn test_can_match_exact() {
        let price = Price::from_u64(50000);
        assert!(can_match(price, price), "Equal prices should match");
    }

    #[test]
    fn test_can_match_no_cross() {
        let bid = Price::from_u64(49000);
        let ask = Price::from_u64(50000);
        assert!(!can_match(bid, ask), "Bid < ask should not match");
    }

    #[test]
    fn test_incoming_buy_can_match() {
        let buy_price = Price::from_u64(50000);
        assert!(incoming_can_match(Side::BUY, buy_price, Price::from_u64(49000)));
        assert!(!incoming_can_match(Side::BUY, buy_price, Price::from_u64(50100)));
    }

    #[test]
    fn test_incoming_sell_can_match() {
        let sell_price = Price::from_u64(49000);
        assert!(incoming_can_match(Side::SELL, sell_price, Price::from_u64(50000)));
        assert!(!incoming_can_match(Side::SELL, sell_price, Price::from_u64(48000)));
    }

    #[test]
    fn test_is_crossed() {
        let p = Price::from_u64;
        assert!(!is_crossed(None, Some(p(1))));
        assert!(!is_crossed(Some(p(1)), None));
        assert!(!is_crossed(Some(p(100)), Some(p(101))));
        assert!(is_crossed(Some(p(101)), Some(p(101))));
    }
}
