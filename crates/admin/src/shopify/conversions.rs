//! Conversions between GraphQL shapes and domain types.

use order_seeder_core::{
    CurrencyCode, Customer, CustomerId, FinancialStatus, OrderId, OrderRequest, Price, Product,
    ProductId, TransactionKind, TransactionStatus, Variant, VariantId,
};

use super::queries::{get_seed_customers, get_seed_products, seed_order_create};
use crate::seeding::{CreateOrderResult, UserError};

pub fn convert_customer(node: get_seed_customers::GetSeedCustomersCustomersEdgesNode) -> Customer {
    Customer {
        id: CustomerId::new(node.id),
        display_name: Some(node.display_name).filter(|n| !n.is_empty()),
    }
}

pub fn convert_product(node: get_seed_products::GetSeedProductsProductsEdgesNode) -> Product {
    Product {
        id: ProductId::new(node.id),
        title: node.title,
        vendor: Some(node.vendor).filter(|v| !v.is_empty()),
        variants: node
            .variants
            .edges
            .into_iter()
            .map(|edge| convert_variant(edge.node))
            .collect(),
    }
}

fn convert_variant(
    v: get_seed_products::GetSeedProductsProductsEdgesNodeVariantsEdgesNode,
) -> Variant {
    Variant {
        id: VariantId::new(v.id),
        title: v.title,
        sku: v.sku.filter(|s| !s.is_empty()),
    }
}

fn currency_code(code: CurrencyCode) -> seed_order_create::CurrencyCode {
    match code {
        CurrencyCode::USD => seed_order_create::CurrencyCode::USD,
        CurrencyCode::EUR => seed_order_create::CurrencyCode::EUR,
        CurrencyCode::GBP => seed_order_create::CurrencyCode::GBP,
        CurrencyCode::CAD => seed_order_create::CurrencyCode::CAD,
        CurrencyCode::AUD => seed_order_create::CurrencyCode::AUD,
    }
}

fn financial_status(
    status: FinancialStatus,
) -> seed_order_create::OrderCreateFinancialStatus {
    use seed_order_create::OrderCreateFinancialStatus as Status;

    match status {
        FinancialStatus::Pending => Status::PENDING,
        FinancialStatus::Authorized => Status::AUTHORIZED,
        FinancialStatus::PartiallyPaid => Status::PARTIALLY_PAID,
        FinancialStatus::Paid => Status::PAID,
        FinancialStatus::PartiallyRefunded => Status::PARTIALLY_REFUNDED,
        FinancialStatus::Refunded => Status::REFUNDED,
        FinancialStatus::Voided => Status::VOIDED,
    }
}

fn transaction_kind(kind: TransactionKind) -> seed_order_create::OrderTransactionKind {
    use seed_order_create::OrderTransactionKind as Kind;

    match kind {
        TransactionKind::Sale => Kind::SALE,
        TransactionKind::Authorization => Kind::AUTHORIZATION,
        TransactionKind::Capture => Kind::CAPTURE,
        TransactionKind::Refund => Kind::REFUND,
        TransactionKind::Void => Kind::VOID,
    }
}

fn transaction_status(
    status: TransactionStatus,
) -> seed_order_create::OrderTransactionStatus {
    use seed_order_create::OrderTransactionStatus as Status;

    match status {
        TransactionStatus::Success => Status::SUCCESS,
        TransactionStatus::Pending => Status::PENDING,
        TransactionStatus::Failure => Status::FAILURE,
        TransactionStatus::Error => Status::ERROR,
    }
}

fn money(price: Price) -> seed_order_create::MoneyBagInput {
    seed_order_create::MoneyBagInput {
        shop_money: seed_order_create::MoneyInput {
            amount: price.amount_string(),
            currency_code: currency_code(price.currency_code),
        },
    }
}

/// Build `orderCreate` variables from a synthesized request.
///
/// Receipts are suppressed and inventory is bypassed so seeding has no
/// side effects beyond the orders themselves.
pub fn order_create_variables(request: &OrderRequest) -> seed_order_create::Variables {
    use seed_order_create::{
        OrderCreateAssociateCustomerAttributesInput, OrderCreateCustomerInput,
        OrderCreateInputsInventoryBehavior, OrderCreateLineItemInput, OrderCreateOptionsInput,
        OrderCreateOrderInput, OrderCreateOrderTransactionInput, Variables,
    };

    let line_items = request
        .line_items()
        .iter()
        .map(|item| OrderCreateLineItemInput {
            product_id: Some(item.product_id.to_string()),
            variant_id: Some(item.variant_id.to_string()),
            sku: item.sku.clone(),
            vendor: item.vendor.clone(),
            title: None,
            quantity: i64::from(item.quantity),
            price_set: Some(money(item.unit_price)),
        })
        .collect();

    let transactions = request
        .transactions()
        .iter()
        .map(|t| OrderCreateOrderTransactionInput {
            kind: Some(transaction_kind(t.kind)),
            status: Some(transaction_status(t.status)),
            amount_set: money(t.amount),
        })
        .collect();

    Variables {
        order: OrderCreateOrderInput {
            currency: Some(currency_code(request.currency())),
            customer: Some(OrderCreateCustomerInput {
                to_associate: Some(OrderCreateAssociateCustomerAttributesInput {
                    id: Some(request.customer().to_string()),
                    email: None,
                }),
            }),
            financial_status: Some(financial_status(request.financial_status())),
            line_items: Some(line_items),
            note: None,
            tags: None,
            transactions: Some(transactions),
        },
        options: Some(OrderCreateOptionsInput {
            inventory_behaviour: Some(OrderCreateInputsInventoryBehavior::BYPASS),
            send_receipt: Some(false),
            send_fulfillment_receipt: Some(false),
        }),
    }
}

/// Classify an `orderCreate` payload.
///
/// Non-empty `userErrors` win over a returned order. A payload with neither
/// is reported as a rejection with a synthetic message.
pub fn convert_order_create(
    payload: Option<seed_order_create::SeedOrderCreateOrderCreate>,
) -> CreateOrderResult {
    let Some(payload) = payload else {
        return CreateOrderResult::Rejected {
            user_errors: vec![missing_order()],
        };
    };

    if !payload.user_errors.is_empty() {
        return CreateOrderResult::Rejected {
            user_errors: payload
                .user_errors
                .into_iter()
                .map(|e| UserError {
                    field: e.field.unwrap_or_default(),
                    message: e.message,
                })
                .collect(),
        };
    }

    match payload.order {
        Some(order) => CreateOrderResult::Created {
            order_id: OrderId::new(order.id),
        },
        None => CreateOrderResult::Rejected {
            user_errors: vec![missing_order()],
        },
    }
}

fn missing_order() -> UserError {
    UserError {
        field: Vec::new(),
        message: "orderCreate returned neither an order nor user errors".to_string(),
    }
}
