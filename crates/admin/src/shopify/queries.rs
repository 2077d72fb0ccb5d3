//! GraphQL operation definitions for the order seeder.
//!
//! Uses `graphql_client` to generate type-safe Rust code from the
//! operations in `graphql/admin/queries/seeding.graphql`, checked against the
//! Admin schema subset in `graphql/admin/schema.graphql`.

use graphql_client::GraphQLQuery;

// =============================================================================
// Custom scalar type aliases (used by graphql_client)
// =============================================================================

/// Decimal number as string (preserves precision).
type Decimal = String;

// =============================================================================
// Reference data queries
// =============================================================================

#[derive(GraphQLQuery)]
#[graphql(
    schema_path = "graphql/admin/schema.graphql",
    query_path = "graphql/admin/queries/seeding.graphql",
    response_derives = "Debug, Clone"
)]
pub struct GetSeedCustomers;

#[derive(GraphQLQuery)]
#[graphql(
    schema_path = "graphql/admin/schema.graphql",
    query_path = "graphql/admin/queries/seeding.graphql",
    response_derives = "Debug, Clone"
)]
pub struct GetSeedProducts;

// =============================================================================
// Order mutations
// =============================================================================

#[derive(GraphQLQuery)]
#[graphql(
    schema_path = "graphql/admin/schema.graphql",
    query_path = "graphql/admin/queries/seeding.graphql",
    response_derives = "Debug, Clone",
    variables_derives = "Debug, Clone"
)]
pub struct SeedOrderCreate;

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_build_query_carries_operation_name() {
        let body = GetSeedProducts::build_query(get_seed_products::Variables {
            first: 50,
            variants_first: 100,
        });

        assert_eq!(body.operation_name, "GetSeedProducts");
        assert!(body.query.contains("variants(first: $variantsFirst)"));

        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["variables"]["variantsFirst"], 100);
        assert_eq!(json["operationName"], "GetSeedProducts");
    }

    #[test]
    fn test_customer_response_parses() {
        let data: get_seed_customers::ResponseData = serde_json::from_str(
            r#"{"customers":{"edges":[
                {"node":{"id":"gid://shopify/Customer/1","displayName":"Ada"}},
                {"node":{"id":"gid://shopify/Customer/2","displayName":"Grace"}}
            ]}}"#,
        )
        .unwrap();

        let names: Vec<_> = data
            .customers
            .edges
            .into_iter()
            .map(|edge| edge.node.display_name)
            .collect();
        assert_eq!(names, ["Ada", "Grace"]);
    }

    #[test]
    fn test_order_create_response_parses_user_errors() {
        let data: seed_order_create::ResponseData = serde_json::from_str(
            r#"{"orderCreate":{"order":null,"userErrors":[
                {"field":["order","lineItems","0","variantId"],"message":"Variant does not exist"}
            ]}}"#,
        )
        .unwrap();

        let payload = data.order_create.unwrap();
        assert!(payload.order.is_none());
        assert_eq!(payload.user_errors[0].message, "Variant does not exist");
    }
}
