//! Capabilities granted by the commerce backend.
//!
//! These are plain names; [`Capability`](crate::Capability) accepts any string,
//! so sections may also require capabilities not listed here.

pub const MANAGE_APPS: &str = "MANAGE_APPS";
pub const MANAGE_CHANNELS: &str = "MANAGE_CHANNELS";
pub const MANAGE_CHECKOUTS: &str = "MANAGE_CHECKOUTS";
pub const MANAGE_DISCOUNTS: &str = "MANAGE_DISCOUNTS";
pub const MANAGE_GIFT_CARD: &str = "MANAGE_GIFT_CARD";
pub const MANAGE_MENUS: &str = "MANAGE_MENUS";
pub const MANAGE_ORDERS: &str = "MANAGE_ORDERS";
pub const MANAGE_PAGES: &str = "MANAGE_PAGES";
pub const MANAGE_PAGE_TYPES_AND_ATTRIBUTES: &str = "MANAGE_PAGE_TYPES_AND_ATTRIBUTES";
pub const MANAGE_PLUGINS: &str = "MANAGE_PLUGINS";
pub const MANAGE_PRODUCTS: &str = "MANAGE_PRODUCTS";
pub const MANAGE_PRODUCT_TYPES_AND_ATTRIBUTES: &str = "MANAGE_PRODUCT_TYPES_AND_ATTRIBUTES";
pub const MANAGE_SETTINGS: &str = "MANAGE_SETTINGS";
pub const MANAGE_SHIPPING: &str = "MANAGE_SHIPPING";
pub const MANAGE_STAFF: &str = "MANAGE_STAFF";
pub const MANAGE_TAXES: &str = "MANAGE_TAXES";
pub const MANAGE_TRANSLATIONS: &str = "MANAGE_TRANSLATIONS";
pub const MANAGE_USERS: &str = "MANAGE_USERS";
pub const HANDLE_PAYMENTS: &str = "HANDLE_PAYMENTS";
pub const IMPERSONATE_USER: &str = "IMPERSONATE_USER";

/// Every capability above, in declaration order.
pub const ALL: &[&str] = &[
	MANAGE_APPS,
	MANAGE_CHANNELS,
	MANAGE_CHECKOUTS,
	MANAGE_DISCOUNTS,
	MANAGE_GIFT_CARD,
	MANAGE_MENUS,
	MANAGE_ORDERS,
	MANAGE_PAGES,
	MANAGE_PAGE_TYPES_AND_ATTRIBUTES,
	MANAGE_PLUGINS,
	MANAGE_PRODUCTS,
	MANAGE_PRODUCT_TYPES_AND_ATTRIBUTES,
	MANAGE_SETTINGS,
	MANAGE_SHIPPING,
	MANAGE_STAFF,
	MANAGE_TAXES,
	MANAGE_TRANSLATIONS,
	MANAGE_USERS,
	HANDLE_PAYMENTS,
	IMPERSONATE_USER,
];
