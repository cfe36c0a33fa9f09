use crate::{
    abstract_trait::{
        notification::{DynNotificationSink, notify_all},
        order::DynOrderStore,
        product::DynProductStore,
        review::{DynReviewStore, ReviewServiceTrait},
    },
    domain::{
        actor::Actor,
        enums::{NotificationKind, OrderStatus},
        rating::RatingStats,
        requests::{
            PageRequest,
            notification::CreateNotificationRecord,
            page_window,
            review::{
                CreateReviewRecord, CreateReviewRequest, FindProductReviews, ReplyReviewRequest,
                ReviewListQuery, UpdateReviewRecord, UpdateReviewRequest,
            },
        },
        response::{
            api::{ApiResponse, ApiResponsePagination},
            pagination::Pagination,
            review::{ProductReviewsResponse, ReviewReplyResponse, ReviewResponse},
        },
    },
    model::{
        product::Product,
        review::{Review, ReviewReply},
    },
    service::{found, validate_request},
};
use async_trait::async_trait;
use opentelemetry::KeyValue;
use prometheus_client::registry::Registry;
use serde_json::json;
use shared::{
    errors::ServiceError,
    utils::{Method, ServiceTracer},
};
use std::collections::HashMap;
use tracing::info;

#[derive(Clone)]
pub struct ReviewService {
    reviews: DynReviewStore,
    orders: DynOrderStore,
    products: DynProductStore,
    notifier: DynNotificationSink,
    tracer: ServiceTracer,
}

fn precondition(message: &str) -> ServiceError {
    ServiceError::Validation(vec![message.to_string()])
}

impl ReviewService {
    pub fn new(
        reviews: DynReviewStore,
        orders: DynOrderStore,
        products: DynProductStore,
        notifier: DynNotificationSink,
        registry: &mut Registry,
    ) -> Self {
        Self {
            reviews,
            orders,
            products,
            notifier,
            tracer: ServiceTracer::new("review_service", "ReviewService", registry),
        }
    }

    async fn product(&self, product_id: i64) -> Result<Product, ServiceError> {
        found(self.products.find_by_id(product_id).await?, "Product")
    }

    async fn owned_review(&self, actor: &Actor, id: i64) -> Result<Review, ServiceError> {
        let review = found(self.reviews.find_by_id(id).await?, "Review")?;
        if review.user_id != actor.user_id {
            return Err(ServiceError::Forbidden(
                "you can only manage your own reviews".into(),
            ));
        }
        Ok(review)
    }

    async fn refresh_rating(&self, product_id: i64) -> Result<(), ServiceError> {
        let (average, count) = self.reviews.refresh_product_rating(product_id).await?;
        info!("⭐ Product {product_id} rating is now {average} over {count} reviews");
        Ok(())
    }

    /// Pairs each review with its reply, if any.
    async fn with_replies(&self, reviews: Vec<Review>) -> Result<Vec<ReviewResponse>, ServiceError> {
        let ids: Vec<i64> = reviews.iter().map(|r| r.id).collect();
        let mut replies: HashMap<i64, ReviewReply> = self
            .reviews
            .find_replies(&ids)
            .await?
            .into_iter()
            .map(|reply| (reply.review_id, reply))
            .collect();

        Ok(reviews
            .into_iter()
            .map(|review| {
                let reply = replies.remove(&review.id);
                ReviewResponse::new(review, reply)
            })
            .collect())
    }

    async fn create(
        &self,
        actor: &Actor,
        req: &CreateReviewRequest,
    ) -> Result<ApiResponse<ReviewResponse>, ServiceError> {
        validate_request(req)?;

        let item = found(
            self.orders.find_item_context(req.order_item_id).await?,
            "Order item",
        )?;

        if item.buyer_id != actor.user_id {
            return Err(precondition("order item does not belong to you"));
        }
        if item.product_id != req.product_id {
            return Err(precondition("product does not match the order item"));
        }
        if item.order_status != OrderStatus::Completed {
            return Err(precondition("order is not completed yet"));
        }
        if self
            .reviews
            .exists_for(actor.user_id, req.product_id, req.order_item_id)
            .await?
        {
            return Err(ServiceError::Conflict(
                "you have already reviewed this product".into(),
            ));
        }

        let review = self
            .reviews
            .create_review(&CreateReviewRecord {
                user_id: actor.user_id,
                product_id: req.product_id,
                order_item_id: req.order_item_id,
                rating: req.rating,
                comment: req.comment.trim().to_string(),
                images: req.images.clone(),
            })
            .await?;

        self.refresh_rating(review.product_id).await?;
        info!(
            "📝 User {} reviewed product {} with {} stars",
            actor.user_id, review.product_id, review.rating
        );

        notify_all(
            &self.notifier,
            vec![
                CreateNotificationRecord::new(
                    item.seller_id,
                    NotificationKind::System,
                    "New review",
                    format!("Your product received a {}-star review", review.rating),
                )
                .with_link(format!("/products/{}", review.product_id))
                .with_data(json!({ "review_id": review.id, "product_id": review.product_id }))
                .for_order(item.order_id),
            ],
        )
        .await;

        Ok(ApiResponse::ok("Review created successfully", review.into()))
    }

    async fn update(
        &self,
        actor: &Actor,
        id: i64,
        req: &UpdateReviewRequest,
    ) -> Result<ApiResponse<ReviewResponse>, ServiceError> {
        validate_request(req)?;
        let current = self.owned_review(actor, id).await?;

        let review = self
            .reviews
            .update_review(&UpdateReviewRecord {
                id,
                rating: req.rating.unwrap_or(current.rating),
                comment: req
                    .comment
                    .as_ref()
                    .map(|c| c.trim().to_string())
                    .unwrap_or(current.comment),
                images: req.images.clone().unwrap_or(current.images.0),
            })
            .await?;

        self.refresh_rating(review.product_id).await?;
        let reply = self.reviews.find_reply(review.id).await?;

        Ok(ApiResponse::ok(
            "Review updated successfully",
            ReviewResponse::new(review, reply),
        ))
    }

    async fn delete(&self, actor: &Actor, id: i64) -> Result<ApiResponse<()>, ServiceError> {
        let review = self.owned_review(actor, id).await?;
        self.reviews.delete_review(review.id).await?;
        self.refresh_rating(review.product_id).await?;

        info!("🗑️ Review {id} deleted by user {}", actor.user_id);
        Ok(ApiResponse::ok("Review deleted successfully", ()))
    }

    async fn detail(&self, actor: &Actor, id: i64) -> Result<ApiResponse<ReviewResponse>, ServiceError> {
        let review = found(self.reviews.find_by_id(id).await?, "Review")?;

        if review.user_id != actor.user_id {
            let product = self.product(review.product_id).await?;
            if product.seller_id != actor.user_id {
                return Err(ServiceError::Forbidden(
                    "you are not allowed to view this review".into(),
                ));
            }
        }

        let reply = self.reviews.find_reply(review.id).await?;
        Ok(ApiResponse::ok(
            "Review retrieved successfully",
            ReviewResponse::new(review, reply),
        ))
    }

    async fn by_user(
        &self,
        actor: &Actor,
        req: &PageRequest,
    ) -> Result<ApiResponsePagination<Vec<ReviewResponse>>, ServiceError> {
        validate_request(req)?;

        let (limit, offset) = page_window(req.page, req.page_size);
        let (reviews, total) = self
            .reviews
            .find_all(&ReviewListQuery {
                product_id: None,
                user_id: Some(actor.user_id),
                rating: None,
                has_reply: None,
                limit,
                offset,
            })
            .await?;

        Ok(ApiResponsePagination::ok(
            "Reviews retrieved successfully",
            self.with_replies(reviews).await?,
            Pagination::new(req.page, limit as i32, total),
        ))
    }

    async fn by_product(
        &self,
        product_id: i64,
        req: &FindProductReviews,
    ) -> Result<ApiResponsePagination<ProductReviewsResponse>, ServiceError> {
        validate_request(req)?;
        self.product(product_id).await?;

        let (limit, offset) = page_window(req.page, req.page_size);
        let (reviews, total) = self
            .reviews
            .find_all(&ReviewListQuery {
                product_id: Some(product_id),
                user_id: None,
                rating: req.rating,
                has_reply: req.has_reply,
                limit,
                offset,
            })
            .await?;

        let stats = RatingStats::from_counts(&self.reviews.rating_counts(product_id).await?);

        Ok(ApiResponsePagination::ok(
            "Product reviews retrieved successfully",
            ProductReviewsResponse {
                stats,
                reviews: self.with_replies(reviews).await?,
            },
            Pagination::new(req.page, limit as i32, total),
        ))
    }

    async fn reply(
        &self,
        actor: &Actor,
        review_id: i64,
        req: &ReplyReviewRequest,
    ) -> Result<ApiResponse<ReviewReplyResponse>, ServiceError> {
        validate_request(req)?;

        let review = found(self.reviews.find_by_id(review_id).await?, "Review")?;
        let product = self.product(review.product_id).await?;
        if product.seller_id != actor.user_id {
            return Err(ServiceError::Forbidden(
                "only the product's seller can reply to this review".into(),
            ));
        }

        let (reply, created) = self
            .reviews
            .upsert_reply(review.id, actor.user_id, req.comment.trim())
            .await?;

        if created {
            info!("💬 Seller {} replied to review {}", actor.user_id, review.id);
            notify_all(
                &self.notifier,
                vec![
                    CreateNotificationRecord::new(
                        review.user_id,
                        NotificationKind::System,
                        "Seller replied to your review",
                        format!("The seller replied to your review of {}", product.name),
                    )
                    .with_link(format!("/products/{}", product.id))
                    .with_data(json!({ "review_id": review.id })),
                ],
            )
            .await;
        }

        let message = if created {
            "Reply added successfully"
        } else {
            "Reply updated successfully"
        };
        Ok(ApiResponse::ok(message, reply.into()))
    }
}

#[async_trait]
impl ReviewServiceTrait for ReviewService {
    async fn create_review(
        &self,
        actor: &Actor,
        req: &CreateReviewRequest,
    ) -> Result<ApiResponse<ReviewResponse>, ServiceError> {
        let method = Method::Post;
        let tracing_ctx = self.tracer.start(
            "create_review",
            vec![
                KeyValue::new("component", "review"),
                KeyValue::new("user_id", actor.user_id),
                KeyValue::new("product_id", req.product_id),
                KeyValue::new("order_item_id", req.order_item_id),
            ],
        );

        let result = self.create(actor, req).await;
        self.tracer
            .finish(&tracing_ctx, method, result, "Review created")
    }

    async fn update_review(
        &self,
        actor: &Actor,
        id: i64,
        req: &UpdateReviewRequest,
    ) -> Result<ApiResponse<ReviewResponse>, ServiceError> {
        let method = Method::Put;
        let tracing_ctx = self.tracer.start(
            "update_review",
            vec![
                KeyValue::new("component", "review"),
                KeyValue::new("review_id", id),
            ],
        );

        let result = self.update(actor, id, req).await;
        self.tracer
            .finish(&tracing_ctx, method, result, "Review updated")
    }

    async fn delete_review(&self, actor: &Actor, id: i64) -> Result<ApiResponse<()>, ServiceError> {
        let method = Method::Delete;
        let tracing_ctx = self.tracer.start(
            "delete_review",
            vec![
                KeyValue::new("component", "review"),
                KeyValue::new("review_id", id),
            ],
        );

        let result = self.delete(actor, id).await;
        self.tracer
            .finish(&tracing_ctx, method, result, "Review deleted")
    }

    async fn find_review(
        &self,
        actor: &Actor,
        id: i64,
    ) -> Result<ApiResponse<ReviewResponse>, ServiceError> {
        let method = Method::Get;
        let tracing_ctx = self.tracer.start(
            "find_review",
            vec![
                KeyValue::new("component", "review"),
                KeyValue::new("review_id", id),
            ],
        );

        let result = self.detail(actor, id).await;
        self.tracer
            .finish(&tracing_ctx, method, result, "Review retrieved")
    }

    async fn my_reviews(
        &self,
        actor: &Actor,
        req: &PageRequest,
    ) -> Result<ApiResponsePagination<Vec<ReviewResponse>>, ServiceError> {
        let method = Method::Get;
        let tracing_ctx = self.tracer.start(
            "my_reviews",
            vec![
                KeyValue::new("component", "review"),
                KeyValue::new("user_id", actor.user_id),
            ],
        );

        let result = self.by_user(actor, req).await;
        self.tracer
            .finish(&tracing_ctx, method, result, "Reviews retrieved")
    }

    async fn product_reviews(
        &self,
        product_id: i64,
        req: &FindProductReviews,
    ) -> Result<ApiResponsePagination<ProductReviewsResponse>, ServiceError> {
        let method = Method::Get;
        let tracing_ctx = self.tracer.start(
            "product_reviews",
            vec![
                KeyValue::new("component", "review"),
                KeyValue::new("product_id", product_id),
            ],
        );

        let result = self.by_product(product_id, req).await;
        self.tracer
            .finish(&tracing_ctx, method, result, "Product reviews retrieved")
    }

    async fn reply_review(
        &self,
        actor: &Actor,
        review_id: i64,
        req: &ReplyReviewRequest,
    ) -> Result<ApiResponse<ReviewReplyResponse>, ServiceError> {
        let method = Method::Post;
        let tracing_ctx = self.tracer.start(
            "reply_review",
            vec![
                KeyValue::new("component", "review"),
                KeyValue::new("review_id", review_id),
                KeyValue::new("seller_id", actor.user_id),
            ],
        );

        let result = self.reply(actor, review_id, req).await;
        self.tracer
            .finish(&tracing_ctx, method, result, "Review reply saved")
    }
}
