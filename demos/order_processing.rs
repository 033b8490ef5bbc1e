//! E-commerce Order Processing
//!
//! Drives an order through checkout, payment and cancellation with hooks
//! that guard transitions and react to them.
//!
//! Key concepts:
//! - Before/Exit hooks veto a transition before the state changes
//! - Enter/After hooks observe the new state; failing them rolls it back
//! - One event can carry several rules, dispatched on the current state
//!
//! Run with: cargo run --example order_processing

use waypoint::core::{Context, Statable, TrackedState};
use waypoint::{statable, StateMachine};

struct Order {
    id: u64,
    total: f64,
    shipping_address: Option<String>,
    receipts: Vec<String>,
    tracking: TrackedState,
}

statable!(Order => tracking);

fn order_machine() -> StateMachine<Order> {
    let mut machine = StateMachine::new();

    machine.initial("draft");
    machine.state("checkout").enter(|_ctx, order: &mut Order| {
        println!("  [Enter checkout] order {} reserved", order.id);
        Ok(())
    });
    machine.state("paid").enter(|ctx, order: &mut Order| {
        ctx.check()?;
        order.receipts.push(format!("TXN-{}", order.id * 100));
        Ok(())
    });
    machine.state("cancelled");
    machine.state("paid_cancelled").enter(|_ctx, order: &mut Order| {
        order.receipts.push(format!("REFUND-{}", order.id * 100));
        Ok(())
    });

    machine
        .event("checkout")
        .to("checkout")
        .from(["draft"])
        .before(|_ctx, order: &mut Order| {
            anyhow::ensure!(order.shipping_address.is_some(), "order has no shipping address");
            Ok(())
        });
    machine
        .event("pay")
        .to("paid")
        .from(["checkout"])
        .before(|_ctx, order: &mut Order| {
            anyhow::ensure!(order.total > 0.0, "order total must be positive");
            Ok(())
        })
        .after(|_ctx, order: &mut Order| {
            println!("  [After pay] receipts: {}", order.receipts.join(", "));
            Ok(())
        });
    machine.event("cancel").to("cancelled").from(["draft", "checkout"]);
    machine.event("cancel").to("paid_cancelled").from(["paid"]);

    machine
}

fn main() {
    println!("=== E-commerce Order Processing ===\n");

    let machine = order_machine();
    if let Err(errors) = machine.validated() {
        for error in errors {
            println!("Definition error: {}", error);
        }
        return;
    }

    let ctx = Context::background();
    let mut order = Order {
        id: 12345,
        total: 149.99,
        shipping_address: None,
        receipts: Vec::new(),
        tracking: TrackedState::new(),
    };

    println!("Step 1: Checkout without an address");
    if let Err(e) = machine.trigger(&ctx, "checkout", &mut order) {
        println!("  Error: {}", e);
    }
    println!("  State: {:?}\n", order.state());

    order.shipping_address = Some("123 Main St, City, State 12345".to_string());

    for event in ["checkout", "pay", "cancel"] {
        println!("Event: {}", event);
        println!("  Permitted: {:?}", machine.permitted_events(&order));
        match machine.trigger(&ctx, event, &mut order) {
            Ok(change) => println!("  {}\n", change),
            Err(e) => {
                println!("  Error: {}\n", e);
                return;
            }
        }
    }

    println!("Final state: {:?}", order.state());
    println!("Receipts: {}", order.receipts.join(", "));

    println!("\n=== Example Complete ===");
}
