use crate::{
    abstract_trait::{
        address::{DynAddressService, DynAddressStore},
        appointment::{DynAppointmentService, DynAppointmentStore},
        cart::{DynCartService, DynCartStore},
        category::{DynCategoryService, DynCategoryStore},
        dashboard::{DynDashboardService, DynDashboardStore},
        message::{DynMessageService, DynMessageStore},
        notification::{DynNotificationService, DynNotificationSink, DynNotificationStore},
        order::{DynOrderService, DynOrderStore},
        product::{DynProductService, DynProductStore},
        review::{DynReviewService, DynReviewStore},
        seller_location::{DynSellerLocationService, DynSellerLocationStore},
    },
    cache::CartCache,
    repository::{
        memory::MemoryStore,
        postgres::{
            AddressRepository, AppointmentRepository, CartRepository, CategoryRepository,
            DashboardRepository, MessageRepository, NotificationRepository, OrderRepository,
            ProductRepository, ReviewRepository, SellerLocationRepository,
        },
    },
    service::{
        AddressService, AppointmentService, CartService, CategoryService, DashboardService,
        InAppNotifier, MessageService, NotificationService, OrderService, OrderServiceConfig,
        ProductService, ReviewService, SellerLocationService,
    },
};
use chrono::Duration;
use prometheus_client::registry::Registry;
use shared::{cache::CacheStore, config::ConnectionPool};
use std::sync::Arc;

/// One handle per table family. Both backends hand out the same traits.
#[derive(Clone)]
pub struct Stores {
    pub categories: DynCategoryStore,
    pub products: DynProductStore,
    pub carts: DynCartStore,
    pub addresses: DynAddressStore,
    pub orders: DynOrderStore,
    pub dashboard: DynDashboardStore,
    pub reviews: DynReviewStore,
    pub locations: DynSellerLocationStore,
    pub appointments: DynAppointmentStore,
    pub messages: DynMessageStore,
    pub notifications: DynNotificationStore,
}

impl Stores {
    pub fn postgres(pool: ConnectionPool) -> Self {
        Self {
            categories: Arc::new(CategoryRepository::new(pool.clone())),
            products: Arc::new(ProductRepository::new(pool.clone())),
            carts: Arc::new(CartRepository::new(pool.clone())),
            addresses: Arc::new(AddressRepository::new(pool.clone())),
            orders: Arc::new(OrderRepository::new(pool.clone())),
            dashboard: Arc::new(DashboardRepository::new(pool.clone())),
            reviews: Arc::new(ReviewRepository::new(pool.clone())),
            locations: Arc::new(SellerLocationRepository::new(pool.clone())),
            appointments: Arc::new(AppointmentRepository::new(pool.clone())),
            messages: Arc::new(MessageRepository::new(pool.clone())),
            notifications: Arc::new(NotificationRepository::new(pool)),
        }
    }

    pub fn memory(store: MemoryStore) -> Self {
        Self {
            categories: Arc::new(store.clone()),
            products: Arc::new(store.clone()),
            carts: Arc::new(store.clone()),
            addresses: Arc::new(store.clone()),
            orders: Arc::new(store.clone()),
            dashboard: Arc::new(store.clone()),
            reviews: Arc::new(store.clone()),
            locations: Arc::new(store.clone()),
            appointments: Arc::new(store.clone()),
            messages: Arc::new(store.clone()),
            notifications: Arc::new(store),
        }
    }
}

#[derive(Debug, Clone)]
pub struct ServiceSettings {
    pub cart_cache_ttl: Duration,
    pub order: OrderServiceConfig,
}

impl Default for ServiceSettings {
    fn default() -> Self {
        Self {
            cart_cache_ttl: Duration::seconds(60),
            order: OrderServiceConfig::default(),
        }
    }
}

#[derive(Clone)]
pub struct DependenciesInject {
    pub category_service: DynCategoryService,
    pub product_service: DynProductService,
    pub cart_service: DynCartService,
    pub address_service: DynAddressService,
    pub order_service: DynOrderService,
    pub dashboard_service: DynDashboardService,
    pub review_service: DynReviewService,
    pub seller_location_service: DynSellerLocationService,
    pub appointment_service: DynAppointmentService,
    pub message_service: DynMessageService,
    pub notification_service: DynNotificationService,
}

impl std::fmt::Debug for DependenciesInject {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DependenciesInject")
            .field("category_service", &"DynCategoryService")
            .field("product_service", &"DynProductService")
            .field("cart_service", &"DynCartService")
            .field("address_service", &"DynAddressService")
            .field("order_service", &"DynOrderService")
            .field("dashboard_service", &"DynDashboardService")
            .field("review_service", &"DynReviewService")
            .field("seller_location_service", &"DynSellerLocationService")
            .field("appointment_service", &"DynAppointmentService")
            .field("message_service", &"DynMessageService")
            .field("notification_service", &"DynNotificationService")
            .finish()
    }
}

impl DependenciesInject {
    pub fn new(
        stores: Stores,
        cache: Arc<CacheStore>,
        settings: ServiceSettings,
        registry: &mut Registry,
    ) -> Self {
        let notifier: DynNotificationSink =
            Arc::new(InAppNotifier::new(stores.notifications.clone()));
        let cart_cache = CartCache::new(cache, settings.cart_cache_ttl);

        let category_service: DynCategoryService =
            Arc::new(CategoryService::new(stores.categories.clone(), registry));

        let product_service: DynProductService = Arc::new(ProductService::new(
            stores.products.clone(),
            stores.categories.clone(),
            registry,
        ));

        let cart_service: DynCartService = Arc::new(CartService::new(
            stores.carts.clone(),
            stores.products.clone(),
            cart_cache.clone(),
            registry,
        ));

        let address_service: DynAddressService =
            Arc::new(AddressService::new(stores.addresses.clone(), registry));

        let order_service: DynOrderService = Arc::new(OrderService::new(
            stores.orders.clone(),
            stores.addresses.clone(),
            cart_cache,
            notifier.clone(),
            settings.order,
            registry,
        ));

        let dashboard_service: DynDashboardService =
            Arc::new(DashboardService::new(stores.dashboard.clone(), registry));

        let review_service: DynReviewService = Arc::new(ReviewService::new(
            stores.reviews.clone(),
            stores.orders.clone(),
            stores.products.clone(),
            notifier.clone(),
            registry,
        ));

        let seller_location_service: DynSellerLocationService = Arc::new(
            SellerLocationService::new(stores.locations.clone(), registry),
        );

        let appointment_service: DynAppointmentService = Arc::new(AppointmentService::new(
            stores.appointments.clone(),
            stores.locations.clone(),
            notifier.clone(),
            registry,
        ));

        let message_service: DynMessageService = Arc::new(MessageService::new(
            stores.messages.clone(),
            stores.products.clone(),
            stores.appointments.clone(),
            notifier,
            registry,
        ));

        let notification_service: DynNotificationService =
            Arc::new(NotificationService::new(stores.notifications, registry));

        Self {
            category_service,
            product_service,
            cart_service,
            address_service,
            order_service,
            dashboard_service,
            review_service,
            seller_location_service,
            appointment_service,
            message_service,
            notification_service,
        }
    }
}
