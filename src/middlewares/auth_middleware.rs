//! # 인증/인가 미들웨어
//!
//! 라우트 스코프에 붙여 [`RequestGate`](super::RequestGate)의 두 단계를 순서대로 실행합니다.
//!
//! ```rust,ignore
//! web::scope("/orders")
//!     .wrap(AuthMiddleware::required())
//!     .route("", web::get().to(list_my_orders));
//!
//! web::resource("/all")
//!     .wrap(AuthMiddleware::required_with_roles(&[Role::Admin]))
//!     .route(web::get().to(list_all_orders));
//! ```
//!
//! 통과한 요청의 extensions에는 다음이 저장됩니다.
//!
//! - [`TokenClaims`](crate::domain::models::token::TokenClaims)
//! - [`AuthenticatedUser`](crate::domain::models::auth::AuthenticatedUser)
//! - [`RequestContext`](crate::core::RequestContext)
//!
//! 어느 단계든 실패하면 핸들러를 호출하지 않고 같은 401 응답을 돌려줍니다.

use std::future::{Ready, ready};
use std::rc::Rc;

use actix_web::{
    Error, Result,
    body::EitherBody,
    dev::{Service, ServiceRequest, ServiceResponse, Transform},
};

use crate::domain::entities::users::Role;
use crate::middlewares::auth_inner::AuthMiddlewareService;

pub struct AuthMiddleware {
    allowed_roles: Rc<[Role]>,
}

impl AuthMiddleware {
    /// 로그인한 사용자라면 역할과 무관하게 통과
    pub fn required() -> Self {
        Self::required_with_roles(&[Role::User, Role::Seller, Role::Admin])
    }

    /// 주어진 역할 중 하나를 가진 사용자만 통과
    pub fn required_with_roles(roles: &[Role]) -> Self {
        Self {
            allowed_roles: Rc::from(roles),
        }
    }
}

impl<S, B> Transform<S, ServiceRequest> for AuthMiddleware
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Transform = AuthMiddlewareService<S>;
    type InitError = ();
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(AuthMiddlewareService {
            service: Rc::new(service),
            allowed_roles: self.allowed_roles.clone(),
        }))
    }
}
