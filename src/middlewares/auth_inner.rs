//! 인증 미들웨어 서비스 본체

use std::rc::Rc;
use std::time::Duration;

use actix_web::body::EitherBody;
use actix_web::dev::{Service, ServiceRequest, ServiceResponse, forward_ready};
use actix_web::{Error, HttpMessage, HttpResponse, web};
use futures_util::future::LocalBoxFuture;

use crate::config::ServerConfig;
use crate::core::{AppError, AppResult, RequestContext};
use crate::domain::entities::users::Role;
use crate::domain::models::auth::AuthenticatedUser;
use crate::middlewares::RequestGate;

pub struct AuthMiddlewareService<S> {
    pub service: Rc<S>,
    pub allowed_roles: Rc<[Role]>,
}

impl<S, B> Service<ServiceRequest> for AuthMiddlewareService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, actix_web::Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let service = self.service.clone();
        let allowed_roles = self.allowed_roles.clone();

        Box::pin(async move {
            let ctx = RequestContext::new(Some(Duration::from_secs(
                ServerConfig::request_timeout_secs(),
            )));

            match pass_gate(&req, &ctx, &allowed_roles).await {
                Ok(user) => {
                    log::debug!("인증 성공: {}", user.email);
                    req.extensions_mut().insert(user);
                    req.extensions_mut().insert(ctx);
                }
                Err(err) => {
                    // 어느 단계에서 실패했는지는 로그에만 남깁니다
                    log::warn!("요청 거부 ({} {}): {}", req.method(), req.path(), err);
                    let (req, _) = req.into_parts();
                    let res = ServiceResponse::new(req, unauthorized()).map_into_right_body();
                    return Ok(res);
                }
            }

            let res = service.call(req).await?;
            Ok(res.map_into_left_body())
        })
    }
}

async fn pass_gate(
    req: &ServiceRequest,
    ctx: &RequestContext,
    allowed_roles: &[Role],
) -> AppResult<AuthenticatedUser> {
    let gate = req
        .app_data::<web::Data<RequestGate>>()
        .cloned()
        .ok_or_else(|| AppError::InternalError("RequestGate가 등록되지 않았습니다".to_string()))?;

    let auth_header = req
        .headers()
        .get("Authorization")
        .and_then(|h| h.to_str().ok());

    let claims = gate.authenticate(auth_header)?;
    req.extensions_mut().insert(claims.clone());

    gate.authorize(ctx, &claims, allowed_roles).await
}

fn unauthorized() -> HttpResponse {
    HttpResponse::Unauthorized().json(serde_json::json!({ "error": "Unauthorized" }))
}
