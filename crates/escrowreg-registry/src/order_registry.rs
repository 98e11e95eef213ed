//! Escrowed order lifecycle state machine.
//!
//! States: `Created → Shipped`, terminal. Creation prefunds the store
//! immediately (working capital before fulfilment) and locks the order
//! value under the registry's own address; shipment is the single point
//! where escrowed funds are released, split between the affiliate fee and
//! the payout address.

use std::collections::HashMap;

use escrowreg_ledger::{DocumentStore, EscrowBook, Transfer, TxContext, fee_of};
use escrowreg_types::{
    Address, CurrencyCode, Order, OrderId, OrderStatus, RegistryError, RegistryParams, Result,
    constants::{MICROPERUN, TIMESTAMP_UNSET},
};

use crate::price_table::PriceTable;

/// Parameters for creating an order. The order id is caller-supplied and
/// must be unique; a collision is an error.
#[derive(Debug, Clone, Copy)]
pub struct CreateOrder<'a> {
    pub order_id: OrderId,
    /// The buyer's stripped public key, stored opaquely on the order.
    pub buyer_key: [u8; 32],
    /// The store party fulfilling the order.
    pub store: Address,
    /// Receives the microperun fee cut at settlement.
    pub affiliate: Address,
    pub currency: CurrencyCode,
    pub prebuffer_quantity: u128,
    /// Opaque metadata blob, persisted content-addressed.
    pub encapsulated_meta: &'a [u8],
}

/// The order registry: lifecycle state machine plus the administrator-
/// gated price table and settlement parameters.
pub struct OrderRegistry {
    /// The registry's own ledger address. Escrowed order value is the
    /// balance held here.
    address: Address,
    params: RegistryParams,
    prices: PriceTable,
    orders: HashMap<OrderId, Order>,
}

impl OrderRegistry {
    /// Create a registry with the given ledger identity and administrator.
    #[must_use]
    pub fn new(address: Address, admin: Address) -> Self {
        Self {
            address,
            params: RegistryParams::new(admin),
            prices: PriceTable::new(),
            orders: HashMap::new(),
        }
    }

    /// The registry's own ledger address.
    #[must_use]
    pub fn address(&self) -> Address {
        self.address
    }

    // =====================================================================
    // Administrator transitions
    // =====================================================================

    fn require_admin(&self, ctx: &TxContext) -> Result<()> {
        if ctx.caller != self.params.admin {
            return Err(RegistryError::Unauthorized { caller: ctx.caller });
        }
        Ok(())
    }

    /// Set the unit price for a currency. Administrator-only; overwrites
    /// or inserts, idempotent.
    pub fn set_price(
        &mut self,
        ctx: &TxContext,
        currency: CurrencyCode,
        unit_price: u128,
    ) -> Result<()> {
        self.require_admin(ctx)?;
        self.prices.set(currency, unit_price);
        tracing::debug!(%currency, unit_price, "price set");
        Ok(())
    }

    /// Stored unit price for `currency`; `0` means unconfigured.
    #[must_use]
    pub fn price(&self, currency: CurrencyCode) -> u128 {
        self.prices.get(currency)
    }

    /// Set the store prefund amount. Administrator-only.
    pub fn set_store_prefund(&mut self, ctx: &TxContext, amount: u128) -> Result<()> {
        self.require_admin(ctx)?;
        self.params.store_prefund = amount;
        tracing::debug!(amount, "store prefund set");
        Ok(())
    }

    #[must_use]
    pub fn store_prefund(&self) -> u128 {
        self.params.store_prefund
    }

    /// Set the affiliate fee rate. Administrator-only; rates above one
    /// perun (100%) are rejected.
    pub fn set_affiliate_fee_microperun(&mut self, ctx: &TxContext, rate: u128) -> Result<()> {
        self.require_admin(ctx)?;
        if rate > MICROPERUN {
            return Err(RegistryError::InvalidFeeRate { rate });
        }
        self.params.affiliate_fee_microperun = rate;
        tracing::debug!(rate, "affiliate fee rate set");
        Ok(())
    }

    #[must_use]
    pub fn affiliate_fee_microperun(&self) -> u128 {
        self.params.affiliate_fee_microperun
    }

    // =====================================================================
    // Lifecycle transitions
    // =====================================================================

    /// Create an escrowed order.
    ///
    /// The attached value must exceed the store prefund; the excess is the
    /// order `value`. The prefund is transferred to the store immediately,
    /// the value stays locked under the registry address until shipment.
    ///
    /// All fallible checks (duplicate id, currency quote, value bound,
    /// blob persistence) complete before the balance batch and the order
    /// insert, so an error leaves no partial state.
    ///
    /// # Errors
    /// - `DuplicateOrder` if the id already exists
    /// - `UnknownCurrency` if the currency has no non-zero unit price
    /// - `InsufficientValue` if `attached_value <= store_prefund`
    /// - `InsufficientFunds` if the caller's ledger balance cannot cover
    ///   the attachment
    pub fn create(
        &mut self,
        ctx: &TxContext,
        book: &mut EscrowBook,
        docstore: &mut impl DocumentStore,
        req: CreateOrder<'_>,
    ) -> Result<&Order> {
        if self.orders.contains_key(&req.order_id) {
            return Err(RegistryError::DuplicateOrder(req.order_id));
        }

        // A zero or unset unit price must be rejected here, not silently
        // accepted as zero cost.
        let _unit_price = self.prices.quote(req.currency)?;

        let prefund = self.params.store_prefund;
        if ctx.attached_value <= prefund {
            return Err(RegistryError::InsufficientValue {
                required: prefund,
                attached: ctx.attached_value,
            });
        }
        let value = ctx.attached_value - prefund;

        let encapsulated_meta_hash = docstore.put(req.encapsulated_meta)?;

        // Attachment and prefund settle as one batch: the caller funds the
        // registry, the registry prefunds the store, the remainder stays
        // locked under the registry address.
        book.apply(&[
            Transfer::new(ctx.caller, self.address, ctx.attached_value),
            Transfer::new(self.address, req.store, prefund),
        ])?;

        let order = Order {
            id: req.order_id,
            buyer: ctx.caller,
            buyer_key: req.buyer_key,
            store: req.store,
            affiliate: req.affiliate,
            currency: req.currency,
            prebuffer_quantity: req.prebuffer_quantity,
            encapsulated_meta_hash,
            created_at: ctx.now,
            shipped_at: TIMESTAMP_UNSET,
            status: OrderStatus::Created,
            value,
        };

        tracing::info!(
            order_id = %req.order_id,
            buyer = %ctx.caller.short(),
            store = %req.store.short(),
            currency = %req.currency,
            value,
            prefund,
            "order created"
        );

        Ok(self.orders.entry(req.order_id).or_insert(order))
    }

    /// Mark an order as shipped and release the escrowed value.
    ///
    /// Only the order's store party may call this, exactly once. The
    /// affiliate receives `value * affiliate_fee_microperun / 1_000_000`
    /// and the payout address the remainder, atomically with the state
    /// transition.
    ///
    /// # Errors
    /// - `OrderNotFound` if no such order
    /// - `Unauthorized` unless the caller is the order's store
    /// - `InvalidOrderState` unless the order is still `Created`
    /// - `Overflow` if the fee computation exceeds the arithmetic bound
    pub fn mark_as_shipped(
        &mut self,
        ctx: &TxContext,
        book: &mut EscrowBook,
        order_id: OrderId,
        payout: Address,
    ) -> Result<&Order> {
        let order = self
            .orders
            .get_mut(&order_id)
            .ok_or(RegistryError::OrderNotFound(order_id))?;

        if ctx.caller != order.store {
            return Err(RegistryError::Unauthorized { caller: ctx.caller });
        }
        if order.status != OrderStatus::Created {
            return Err(RegistryError::InvalidOrderState {
                expected: OrderStatus::Created,
                actual: order.status,
            });
        }

        let affiliate_fee = fee_of(order.value, self.params.affiliate_fee_microperun)?;
        let remainder = order.value - affiliate_fee;

        // The single release point for escrowed funds. The batch commits
        // before the status flips; if it aborts, the order stays Created.
        book.apply(&[
            Transfer::new(self.address, order.affiliate, affiliate_fee),
            Transfer::new(self.address, payout, remainder),
        ])?;

        order.status = OrderStatus::Shipped;
        order.shipped_at = ctx.now;

        tracing::info!(
            order_id = %order_id,
            store = %ctx.caller.short(),
            payout = %payout.short(),
            affiliate_fee,
            remainder,
            "order shipped, escrow released"
        );

        Ok(order)
    }

    /// Look up an order. Pure read.
    #[must_use]
    pub fn get(&self, order_id: &OrderId) -> Option<&Order> {
        self.orders.get(order_id)
    }

    /// Number of orders ever created.
    #[must_use]
    pub fn len(&self) -> usize {
        self.orders.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.orders.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use escrowreg_ledger::MemoryDocStore;
    use escrowreg_types::constants::MICROPERUN;

    use super::*;

    const PREFUND: u128 = 10_000_000_000_000_000;
    const FEE_RATE: u128 = 50_000; // 5%

    fn addr(n: u8) -> Address {
        Address::from_bytes([n; 20])
    }

    fn usd6() -> CurrencyCode {
        CurrencyCode::parse("USD6").unwrap()
    }

    struct Harness {
        reg: OrderRegistry,
        book: EscrowBook,
        docs: MemoryDocStore,
        admin: Address,
        buyer: Address,
        store: Address,
        affiliate: Address,
    }

    impl Harness {
        fn new() -> Self {
            let admin = addr(0xad);
            let buyer = addr(1);
            let store = addr(2);
            let affiliate = addr(3);
            let mut reg = OrderRegistry::new(addr(0xee), admin);
            let mut book = EscrowBook::new();
            book.deposit(buyer, 100 * PREFUND).unwrap();

            let ctx = TxContext::call(admin, 10);
            reg.set_store_prefund(&ctx, PREFUND).unwrap();
            reg.set_affiliate_fee_microperun(&ctx, FEE_RATE).unwrap();
            reg.set_price(&ctx, usd6(), 1_000_000_000).unwrap();

            Self {
                reg,
                book,
                docs: MemoryDocStore::new(),
                admin,
                buyer,
                store,
                affiliate,
            }
        }

        fn request(&self, order_id: OrderId) -> CreateOrder<'static> {
            CreateOrder {
                order_id,
                buyer_key: [7; 32],
                store: self.store,
                affiliate: self.affiliate,
                currency: usd6(),
                prebuffer_quantity: 100,
                encapsulated_meta: b"encapsulated order meta",
            }
        }

        fn create(&mut self, order_id: OrderId, attached: u128, now: u64) -> Result<Order> {
            let ctx = TxContext::new(self.buyer, attached, now);
            let req = self.request(order_id);
            self.reg
                .create(&ctx, &mut self.book, &mut self.docs, req)
                .cloned()
        }
    }

    fn oid(n: u8) -> OrderId {
        OrderId::from_bytes([n; 32])
    }

    #[test]
    fn admin_gating_on_all_setters() {
        let mut h = Harness::new();
        let intruder = TxContext::call(addr(9), 10);
        assert!(matches!(
            h.reg.set_price(&intruder, usd6(), 1).unwrap_err(),
            RegistryError::Unauthorized { .. }
        ));
        assert!(matches!(
            h.reg.set_store_prefund(&intruder, 1).unwrap_err(),
            RegistryError::Unauthorized { .. }
        ));
        assert!(matches!(
            h.reg
                .set_affiliate_fee_microperun(&intruder, 1)
                .unwrap_err(),
            RegistryError::Unauthorized { .. }
        ));
    }

    #[test]
    fn fee_rate_above_one_perun_rejected() {
        let mut h = Harness::new();
        let ctx = TxContext::call(h.admin, 10);
        let err = h
            .reg
            .set_affiliate_fee_microperun(&ctx, MICROPERUN + 1)
            .unwrap_err();
        assert!(matches!(err, RegistryError::InvalidFeeRate { .. }));
        // Exactly one perun is legal.
        h.reg.set_affiliate_fee_microperun(&ctx, MICROPERUN).unwrap();
    }

    #[test]
    fn params_roundtrip() {
        let h = Harness::new();
        assert_eq!(h.reg.store_prefund(), PREFUND);
        assert_eq!(h.reg.affiliate_fee_microperun(), FEE_RATE);
        assert_eq!(h.reg.price(usd6()), 1_000_000_000);
    }

    #[test]
    fn create_prefunds_store_and_locks_value() {
        let mut h = Harness::new();
        let value = 2 * PREFUND;
        let order = h.create(oid(1), value + PREFUND, 1000).unwrap();

        assert_eq!(order.status, OrderStatus::Created);
        assert_eq!(order.created_at, 1000);
        assert_eq!(order.shipped_at, 0);
        assert_eq!(order.value, value);
        assert_eq!(order.buyer, h.buyer);
        assert_eq!(order.prebuffer_quantity, 100);

        // Store prefunded immediately, value locked under the registry.
        assert_eq!(h.book.balance(h.store), PREFUND);
        assert_eq!(h.book.balance(h.reg.address()), value);
        assert_eq!(h.book.balance(h.buyer), 100 * PREFUND - value - PREFUND);
    }

    #[test]
    fn create_persists_encapsulated_meta() {
        let mut h = Harness::new();
        let order = h.create(oid(1), 3 * PREFUND, 1000).unwrap();
        let blob = h.docs.get(&order.encapsulated_meta_hash).unwrap();
        assert_eq!(blob, b"encapsulated order meta");
    }

    #[test]
    fn duplicate_order_id_rejected() {
        let mut h = Harness::new();
        h.create(oid(1), 3 * PREFUND, 1000).unwrap();
        let err = h.create(oid(1), 3 * PREFUND, 1001).unwrap_err();
        assert!(matches!(err, RegistryError::DuplicateOrder(_)));
        assert_eq!(h.reg.len(), 1);
    }

    #[test]
    fn unknown_currency_rejected() {
        let mut h = Harness::new();
        let ctx = TxContext::new(h.buyer, 3 * PREFUND, 1000);
        let mut req = h.request(oid(1));
        req.currency = CurrencyCode::parse("XXX").unwrap();
        let err = h
            .reg
            .create(&ctx, &mut h.book, &mut h.docs, req)
            .unwrap_err();
        assert!(matches!(err, RegistryError::UnknownCurrency(_)));
    }

    #[test]
    fn zero_priced_currency_rejected() {
        let mut h = Harness::new();
        let admin_ctx = TxContext::call(h.admin, 10);
        let dead = CurrencyCode::parse("DEAD").unwrap();
        h.reg.set_price(&admin_ctx, dead, 0).unwrap();

        let ctx = TxContext::new(h.buyer, 3 * PREFUND, 1000);
        let mut req = h.request(oid(1));
        req.currency = dead;
        let err = h
            .reg
            .create(&ctx, &mut h.book, &mut h.docs, req)
            .unwrap_err();
        assert!(matches!(err, RegistryError::UnknownCurrency(_)));
    }

    #[test]
    fn attached_value_at_or_below_prefund_rejected() {
        let mut h = Harness::new();
        for attached in [0, PREFUND / 2, PREFUND] {
            let err = h.create(oid(1), attached, 1000).unwrap_err();
            assert!(
                matches!(err, RegistryError::InsufficientValue { .. }),
                "attached {attached} should be rejected, got {err}"
            );
        }
        // No mutation happened on any failed attempt.
        assert!(h.reg.is_empty());
        assert_eq!(h.book.balance(h.store), 0);
        assert_eq!(h.book.balance(h.buyer), 100 * PREFUND);
    }

    #[test]
    fn underfunded_caller_aborts_cleanly() {
        let mut h = Harness::new();
        let pauper = addr(0x77);
        let ctx = TxContext::new(pauper, 3 * PREFUND, 1000);
        let req = h.request(oid(1));
        let err = h
            .reg
            .create(&ctx, &mut h.book, &mut h.docs, req)
            .unwrap_err();
        assert!(matches!(err, RegistryError::InsufficientFunds { .. }));
        assert!(h.reg.is_empty());
        assert_eq!(h.book.balance(h.store), 0);
    }

    #[test]
    fn ship_releases_fee_split() {
        let mut h = Harness::new();
        let value = 2 * PREFUND;
        h.create(oid(1), value + PREFUND, 1000).unwrap();

        let payout = addr(0x50);
        let ctx = TxContext::call(h.store, 2000);
        let order = h
            .reg
            .mark_as_shipped(&ctx, &mut h.book, oid(1), payout)
            .unwrap();

        assert_eq!(order.status, OrderStatus::Shipped);
        assert_eq!(order.shipped_at, 2000);

        let fee = value * FEE_RATE / MICROPERUN;
        assert_eq!(h.book.balance(h.affiliate), fee);
        assert_eq!(h.book.balance(payout), value - fee);
        assert_eq!(h.book.balance(h.reg.address()), 0);
    }

    #[test]
    fn ship_unknown_order_fails() {
        let mut h = Harness::new();
        let ctx = TxContext::call(h.store, 2000);
        let err = h
            .reg
            .mark_as_shipped(&ctx, &mut h.book, oid(9), addr(0x50))
            .unwrap_err();
        assert!(matches!(err, RegistryError::OrderNotFound(_)));
    }

    #[test]
    fn ship_by_non_store_caller_fails() {
        let mut h = Harness::new();
        h.create(oid(1), 3 * PREFUND, 1000).unwrap();

        for caller in [h.buyer, h.affiliate, h.admin] {
            let ctx = TxContext::call(caller, 2000);
            let err = h
                .reg
                .mark_as_shipped(&ctx, &mut h.book, oid(1), addr(0x50))
                .unwrap_err();
            assert!(matches!(err, RegistryError::Unauthorized { .. }));
        }
        assert!(h.reg.get(&oid(1)).unwrap().is_open());
    }

    #[test]
    fn second_ship_fails_invalid_state() {
        let mut h = Harness::new();
        h.create(oid(1), 3 * PREFUND, 1000).unwrap();

        let ctx = TxContext::call(h.store, 2000);
        h.reg
            .mark_as_shipped(&ctx, &mut h.book, oid(1), addr(0x50))
            .unwrap();

        let supply_after_first = h.book.total_supply().unwrap();
        let err = h
            .reg
            .mark_as_shipped(&ctx, &mut h.book, oid(1), addr(0x50))
            .unwrap_err();
        assert!(matches!(
            err,
            RegistryError::InvalidOrderState {
                expected: OrderStatus::Created,
                actual: OrderStatus::Shipped
            }
        ));
        // No double release.
        assert_eq!(h.book.total_supply().unwrap(), supply_after_first);
    }

    #[test]
    fn full_fee_rate_routes_everything_to_affiliate() {
        let mut h = Harness::new();
        let admin_ctx = TxContext::call(h.admin, 10);
        h.reg
            .set_affiliate_fee_microperun(&admin_ctx, MICROPERUN)
            .unwrap();

        let value = 2 * PREFUND;
        h.create(oid(1), value + PREFUND, 1000).unwrap();
        let payout = addr(0x50);
        let ctx = TxContext::call(h.store, 2000);
        h.reg
            .mark_as_shipped(&ctx, &mut h.book, oid(1), payout)
            .unwrap();

        assert_eq!(h.book.balance(h.affiliate), value);
        assert_eq!(h.book.balance(payout), 0);
    }

    #[test]
    fn lifecycle_conserves_supply() {
        let mut h = Harness::new();
        let before = h.book.total_supply().unwrap();
        h.create(oid(1), 3 * PREFUND, 1000).unwrap();
        let ctx = TxContext::call(h.store, 2000);
        h.reg
            .mark_as_shipped(&ctx, &mut h.book, oid(1), addr(0x50))
            .unwrap();
        assert_eq!(h.book.total_supply().unwrap(), before);
    }
}
