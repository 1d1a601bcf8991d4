//! Property-based invariant tests
//!
//! Drives a book through random operation sequences and asserts the
//! structural invariants after every single operation: level totals match
//! queue contents, every indexed id resolves, no empty levels survive, the
//! book is never crossed at rest, and fill accounting balances.

use proptest::prelude::*;

use matching_engine::OrderBook;
use types::errors::BookError;
use types::ids::OrderId;
use types::numeric::{Price, Qty};
use types::order::{Order, OrderType, Side};

#[derive(Debug, Clone)]
enum Op {
    Add {
        id: u64,
        side: Side,
        order_type: OrderType,
        price: i64,
        qty: u32,
    },
    Cancel {
        id: u64,
    },
    Modify {
        id: u64,
        new_qty: u32,
    },
}

/// Small id space and a narrow price grid so sequences collide, cross, and
/// stack orders on shared levels often.
fn op_strategy() -> impl Strategy<Value = Op> {
    prop_oneof![
        4 => (
            0u64..24,
            prop::bool::ANY,
            prop::bool::weighted(0.2),
            0i64..8,
            1u32..60,
        )
            .prop_map(|(id, buy, is_market, tick, qty)| Op::Add {
                id,
                side: if buy { Side::Buy } else { Side::Sell },
                order_type: if is_market {
                    OrderType::Market
                } else {
                    OrderType::Limit
                },
                price: 9900 + tick * 25,
                qty,
            }),
        1 => (0u64..24).prop_map(|id| Op::Cancel { id }),
        1 => (0u64..24, 0u32..60).prop_map(|(id, new_qty)| Op::Modify { id, new_qty }),
    ]
}

proptest! {
    #[test]
    fn invariants_hold_under_random_operations(
        ops in prop::collection::vec(op_strategy(), 1..150)
    ) {
        let mut book = OrderBook::new();

        for op in ops {
            match op {
                Op::Add { id, side, order_type, price, qty } => {
                    let order = Order::new(
                        OrderId::new(id),
                        side,
                        order_type,
                        Price::new(price),
                        Qty::new(qty),
                        0,
                    );
                    match book.add_order(order) {
                        Ok(trades) => {
                            let filled: u64 = trades.iter().map(|t| t.qty.as_u64()).sum();
                            prop_assert!(filled <= u64::from(qty));

                            // All trades from one call share a timestamp
                            if let Some(first) = trades.first() {
                                prop_assert!(
                                    trades.iter().all(|t| t.timestamp == first.timestamp)
                                );
                            }

                            match order_type {
                                OrderType::Limit => {
                                    // Fill accounting: resting + filled == original
                                    let resting = book
                                        .find_order(OrderId::new(id))
                                        .map(|o| o.remaining.as_u64())
                                        .unwrap_or(0);
                                    prop_assert_eq!(filled + resting, u64::from(qty));
                                }
                                OrderType::Market => {
                                    // Market residual never rests
                                    prop_assert!(book.find_order(OrderId::new(id)).is_err());
                                }
                            }
                        }
                        Err(BookError::DuplicateOrder(_)) => {
                            // id still resting from an earlier add; book untouched
                        }
                        Err(err) => prop_assert!(false, "unexpected error: {}", err),
                    }
                }
                Op::Cancel { id } => {
                    let first = book.cancel_order(OrderId::new(id));
                    // Cancel is idempotent: a second attempt is always a no-op
                    let second = book.cancel_order(OrderId::new(id));
                    prop_assert!(!second);
                    if first {
                        prop_assert!(book.find_order(OrderId::new(id)).is_err());
                    }
                }
                Op::Modify { id, new_qty } => {
                    let before = book
                        .find_order(OrderId::new(id))
                        .map(|o| o.remaining)
                        .ok();
                    let accepted = book.modify_order(OrderId::new(id), Qty::new(new_qty));

                    match before {
                        None => prop_assert!(!accepted),
                        Some(remaining) => {
                            // Reduce-only: equal or larger is rejected
                            prop_assert_eq!(accepted, Qty::new(new_qty) < remaining);
                            if accepted && new_qty > 0 {
                                prop_assert_eq!(
                                    book.find_order(OrderId::new(id)).unwrap().remaining,
                                    Qty::new(new_qty)
                                );
                            }
                            if accepted && new_qty == 0 {
                                prop_assert!(book.find_order(OrderId::new(id)).is_err());
                            }
                        }
                    }
                }
            }

            book.assert_invariants();
        }
    }

    #[test]
    fn successive_reductions_are_additive(
        qty in 10u32..1000,
        first_cut in 1u32..5,
        second_cut in 1u32..5,
    ) {
        let mut book = OrderBook::new();
        book.add_order(Order::new(
            OrderId::new(1),
            Side::Buy,
            OrderType::Limit,
            Price::new(10000),
            Qty::new(qty),
            0,
        ))
        .unwrap();

        let after_first = qty - first_cut;
        prop_assert!(book.modify_order(OrderId::new(1), Qty::new(after_first)));
        let after_second = after_first - second_cut;
        prop_assert!(book.modify_order(OrderId::new(1), Qty::new(after_second)));

        prop_assert_eq!(
            book.find_order(OrderId::new(1)).unwrap().remaining,
            Qty::new(after_second)
        );
        let depth = book.bid_depth(1);
        prop_assert_eq!(depth[0].total_qty, u64::from(after_second));
        book.assert_invariants();
    }
}
