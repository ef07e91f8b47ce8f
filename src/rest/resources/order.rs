//! Order resource.
//!
//! This module provides the [`Order`] resource for a seller's orders:
//!
//! - [`Order::my_selling`] - `GET /my/orders/selling/all`, one page
//! - [`Order::all_my_selling`] - every page of the same endpoint
//!
//! # Example
//!
//! ```rust,ignore
//! use reverb_api::rest::resources::{MyOrdersParams, Order};
//!
//! let page = Order::my_selling(&client, &MyOrdersParams { page: Some(1), per_page: None }).await?;
//! for order in &page.data.orders {
//!     println!("{:?} {:?}", order.order_number, order.status);
//! }
//! ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::clients::{HttpRequestConfig, HttpResponse, ReverbClient};
use crate::error::ReverbError;
use crate::rest::{create_paginated_result, paginate_all, PaginationOptions};

use super::common::{Link, PaginatedReverbResponse, Photo, Price, ReverbId};

/// HAL links of a shipping address.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct ShippingAddressLinks {
    /// This address.
    #[serde(rename = "self", skip_serializing_if = "Option::is_none")]
    pub self_link: Option<Link>,
}

/// A buyer's shipping address.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct ShippingAddress {
    /// Address ID.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<ReverbId>,
    /// Recipient name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Street line.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub street_address: Option<String>,
    /// Second address line.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub extended_address: Option<String>,
    /// City.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub locality: Option<String>,
    /// State or province.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub region: Option<String>,
    /// Postal code.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub postal_code: Option<String>,
    /// ISO 3166-1 alpha-2 code.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub country_code: Option<String>,
    /// One-line location for display.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display_location: Option<String>,
    /// Formatted phone number.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    /// Phone number as entered.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unformatted_phone: Option<String>,
    /// Whether this is the primary address.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub primary: Option<bool>,
    /// Whether every required field is present.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub complete_shipping_address: Option<bool>,
    /// HAL links.
    #[serde(rename = "_links", skip_serializing_if = "Option::is_none")]
    pub links: Option<ShippingAddressLinks>,
}

/// Links for contacting the buyer.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct ContactBuyerLinks {
    /// Web page for messaging the buyer.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub web: Option<Link>,
}

/// HAL links of an order.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct OrderLinks {
    /// Listing photo.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub photo: Option<Link>,
    /// Leave feedback for the buyer.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub feedback_for_buyer: Option<Link>,
    /// Leave feedback for the seller.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub feedback_for_seller: Option<Link>,
    /// The ordered listing.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub listing: Option<Link>,
    /// Start a conversation.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_conversation: Option<Link>,
    /// Tracking page.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub web_tracking: Option<Link>,
    /// Order web page.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub web: Option<Link>,
    /// Listing web page.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub web_listing: Option<Link>,
    /// This order.
    #[serde(rename = "self", skip_serializing_if = "Option::is_none")]
    pub self_link: Option<Link>,
    /// Mark a local pickup as collected.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mark_picked_up: Option<Link>,
    /// Payments for the order.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payments: Option<Link>,
    /// Buyer contact links.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contact_buyer: Option<ContactBuyerLinks>,
}

/// An order on the seller side.
///
/// Status-like fields (`status`, `order_type`, `shipping_provider`, ...) are
/// kept as strings because Reverb adds values over time.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct Order {
    /// Order UUID.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub uuid: Option<String>,

    /// Order number.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub order_number: Option<ReverbId>,

    /// Bundle grouping orders from one checkout.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub order_bundle_id: Option<ReverbId>,

    /// ID of the ordered listing.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub product_id: Option<ReverbId>,

    /// Listing title at the time of sale.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    /// Seller shop name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shop_name: Option<String>,

    /// `unpaid`, `awaiting_shipment`, `shipped`, ...
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,

    /// Order type.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub order_type: Option<String>,

    /// Where the order was placed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub order_source: Option<String>,

    /// Units ordered.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quantity: Option<u32>,

    /// Unit price.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub amount_product: Option<Price>,

    /// Unit price times quantity.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub amount_product_subtotal: Option<Price>,

    /// Shipping charged.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shipping: Option<Price>,

    /// Tax charged.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub amount_tax: Option<Price>,

    /// Total charged.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total: Option<Price>,

    /// Unit price in the buyer currency.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub presentment_amount_product: Option<Price>,

    /// Subtotal in the buyer currency.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub presentment_amount_product_subtotal: Option<Price>,

    /// Shipping in the buyer currency.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub presentment_amount_shipping: Option<Price>,

    /// Tax in the buyer currency.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub presentment_amount_tax: Option<Price>,

    /// Total in the buyer currency.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub presentment_amount_total: Option<Price>,

    /// Selling fee.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub selling_fee: Option<Price>,

    /// Bump promotion fee.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bump_fee: Option<Price>,

    /// Payment processing fee.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub direct_checkout_fee: Option<Price>,

    /// Tax charged on fees.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tax_on_fees: Option<Price>,

    /// Seller payout.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub direct_checkout_payout: Option<Price>,

    /// Whether shipping was taxed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shipping_taxed: Option<bool>,

    /// Tax rate applied.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tax_rate: Option<f64>,

    /// Who remits the tax.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tax_responsible_party: Option<String>,

    /// Buyer ID.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub buyer_id: Option<ReverbId>,

    /// Buyer full name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub buyer_name: Option<String>,

    /// Buyer first name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub buyer_first_name: Option<String>,

    /// Buyer last name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub buyer_last_name: Option<String>,

    /// Buyer email.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub buyer_email: Option<String>,

    /// Whether the seller still owes feedback.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub needs_feedback_for_buyer: Option<bool>,

    /// Whether the buyer still owes feedback.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub needs_feedback_for_seller: Option<bool>,

    /// Payment method.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payment_method: Option<String>,

    /// Destination address.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shipping_address: Option<ShippingAddress>,

    /// Carrier.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shipping_provider: Option<String>,

    /// Tracking number.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shipping_code: Option<String>,

    /// Shipping method.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shipping_method: Option<String>,

    /// Shipment status.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shipment_status: Option<String>,

    /// Whether the buyer picks the item up.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub local_pickup: Option<bool>,

    /// When the order was placed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,

    /// When the order last changed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,

    /// When payment cleared.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub paid_at: Option<DateTime<Utc>>,

    /// When the item shipped.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shipped_at: Option<DateTime<Utc>>,

    /// Expected ship date.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shipping_date: Option<DateTime<Utc>>,

    /// Listing photos.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub photos: Vec<Photo>,

    /// Notes attached to the order.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub order_notes: Vec<serde_json::Value>,

    /// HAL links.
    #[serde(rename = "_links", skip_serializing_if = "Option::is_none")]
    pub links: Option<OrderLinks>,
}

/// Body of `/my/orders/selling/all`.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct OrdersPage {
    /// Orders on this page.
    #[serde(default)]
    pub orders: Vec<Order>,
}

/// Query parameters for [`Order::my_selling`].
///
/// Unset or zero values are not sent.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MyOrdersParams {
    /// Page number, starting at 1.
    pub page: Option<u32>,
    /// Items per page.
    pub per_page: Option<u32>,
}

impl MyOrdersParams {
    fn to_request_config(self) -> HttpRequestConfig {
        HttpRequestConfig::new()
            .param_opt("page", self.page.filter(|p| *p > 0))
            .param_opt("per_page", self.per_page.filter(|p| *p > 0))
    }
}

impl Order {
    /// Retrieves one page of the authenticated seller's orders.
    ///
    /// # Errors
    ///
    /// Returns [`ReverbError::Http`] on transport failure and
    /// [`ReverbError::Deserialize`] if the body does not match.
    pub async fn my_selling(
        client: &ReverbClient,
        params: &MyOrdersParams,
    ) -> Result<HttpResponse<PaginatedReverbResponse<OrdersPage>>, ReverbError> {
        let response = client
            .get("my/orders/selling/all", params.to_request_config())
            .await?;
        Ok(response.json()?)
    }

    /// Retrieves every order of the authenticated seller.
    ///
    /// # Errors
    ///
    /// Returns the first page error; orders fetched before it are dropped.
    pub async fn all_my_selling(
        client: &ReverbClient,
        per_page: u32,
    ) -> Result<Vec<Self>, ReverbError> {
        paginate_all(
            |page, page_size| async move {
                let params = MyOrdersParams {
                    page: Some(page),
                    per_page: Some(page_size),
                };
                let response = Self::my_selling(client, &params).await?;
                let orders = response.data.into_inner().orders;
                Ok::<_, ReverbError>(create_paginated_result(orders, page_size, page))
            },
            PaginationOptions::new().page_size(per_page),
        )
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_order_deserializes_reverb_payload() {
        let order: Order = serde_json::from_value(json!({
            "order_number": "88123",
            "uuid": "0e7a-4c1b",
            "status": "awaiting_shipment",
            "quantity": 1,
            "total": {"amount": "512.40", "amount_cents": 51_240, "currency": "USD", "symbol": "$", "display": "$512.40"},
            "tax_rate": 0.0825,
            "created_at": "2024-01-02T03:04:05Z",
            "shipping_address": {
                "name": "Pat Doe",
                "country_code": "US",
                "_links": {"self": {"href": "https://api.reverb.com/api/my/addresses/1"}}
            },
            "contact_buyer": null,
            "order_notes": [],
            "_links": {"contact_buyer": {"web": {"href": "https://reverb.com/my/messages/new"}}}
        }))
        .unwrap();

        assert_eq!(order.order_number, Some(ReverbId::Text("88123".to_string())));
        assert_eq!(order.status.as_deref(), Some("awaiting_shipment"));
        assert_eq!(order.total.unwrap().amount_cents, Some(51_240));
        assert_eq!(
            order.created_at.unwrap().to_rfc3339(),
            "2024-01-02T03:04:05+00:00"
        );
        assert_eq!(
            order.shipping_address.unwrap().country_code.as_deref(),
            Some("US")
        );
        assert!(order.links.unwrap().contact_buyer.unwrap().web.is_some());
    }

    #[test]
    fn test_my_orders_params_skip_unset_values() {
        let config = MyOrdersParams {
            page: Some(3),
            per_page: None,
        }
        .to_request_config();

        assert_eq!(config.params.len(), 1);
        assert_eq!(config.params.get("page"), Some(&json!(3)));
    }
}
