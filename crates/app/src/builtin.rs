//! The dashboard's own sections, in resolution order.

use dashgate_permissions::known::*;
use dashgate_registry::metadata::FULL_SIZE;
use dashgate_registry::{RouteRecord, RouteTable};

/// Capabilities behind at least one entry of the configuration menu.
pub const CONFIGURATION_MENU: &[&str] = &[
	MANAGE_PRODUCT_TYPES_AND_ATTRIBUTES,
	MANAGE_PAGE_TYPES_AND_ATTRIBUTES,
	MANAGE_STAFF,
	MANAGE_SETTINGS,
	MANAGE_TAXES,
	MANAGE_SHIPPING,
	MANAGE_PRODUCTS,
	MANAGE_CHANNELS,
	MANAGE_MENUS,
	MANAGE_PLUGINS,
	MANAGE_TRANSLATIONS,
];

fn section(name: &str, path: &str) -> RouteRecord {
	RouteRecord::new(path, format!("sections/{name}")).named(name)
}

/// Builds the builtin route table.
pub fn dashboard_routes() -> RouteTable {
	RouteTable::new(vec![
		section("welcome", "/").exact(),
		section("categories", "/categories").require_all([MANAGE_PRODUCTS]),
		section("collections", "/collections").require_all([MANAGE_PRODUCTS]),
		section("customers", "/customers").require_all([MANAGE_USERS]),
		section("gift-cards", "/gift-cards").require_all([MANAGE_GIFT_CARD]),
		section("discounts", "/discounts").require_all([MANAGE_DISCOUNTS]),
		section("pages", "/pages").require_all([MANAGE_PAGES]),
		section("page-types", "/page-types").require_any([MANAGE_PAGES, MANAGE_PAGE_TYPES_AND_ATTRIBUTES]),
		section("plugins", "/plugins").require_all([MANAGE_PLUGINS]),
		section("orders", "/orders").require_all([MANAGE_ORDERS]),
		section("products", "/products").require_all([MANAGE_PRODUCTS]),
		section("product-types", "/product-types").require_all([MANAGE_PRODUCT_TYPES_AND_ATTRIBUTES]),
		section("staff", "/staff"),
		section("permission-groups", "/permission-groups").require_all([MANAGE_STAFF]),
		section("site-settings", "/site-settings").require_all([MANAGE_SETTINGS]),
		section("taxes", "/taxes"),
		section("shipping", "/shipping").require_all([MANAGE_SHIPPING]),
		section("translations", "/translations").require_all([MANAGE_TRANSLATIONS]),
		section("navigation", "/navigation").require_all([MANAGE_MENUS]),
		section("attributes", "/attributes")
			.require_any([MANAGE_PRODUCT_TYPES_AND_ATTRIBUTES, MANAGE_PAGE_TYPES_AND_ATTRIBUTES]),
		section("apps", "/apps").with_metadata(FULL_SIZE, "true"),
		section("extensions", "/extensions"),
		section("warehouses", "/warehouses").require_all([MANAGE_PRODUCTS]),
		section("channels", "/channels").require_all([MANAGE_CHANNELS]),
		section("configuration", "/configuration")
			.exact()
			.require_any(CONFIGURATION_MENU.iter().copied()),
		section("custom-apps", "/custom-apps"),
	])
}
