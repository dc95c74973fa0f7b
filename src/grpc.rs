//! Binary RPC adapter: the same five operations as the HTTP surface, served
//! over gRPC against the same session service instance.

use std::sync::Arc;

use tonic::{Request, Response, Status};

use crate::errors::AppError;
use crate::state::AppState;

pub mod proto {
    tonic::include_proto!("auth.v1");
}

use proto::auth_server::{Auth, AuthServer};

impl From<AppError> for Status {
    fn from(e: AppError) -> Self {
        match e {
            AppError::Validation(s) => Status::invalid_argument(s),
            AppError::InvalidCredentials => Status::unauthenticated("invalid credentials"),
            AppError::InvalidToken => Status::unauthenticated("invalid token"),
            AppError::Conflict(s) => Status::already_exists(s),
            AppError::Db(_) => Status::unavailable("store error"),
            AppError::Internal(_) => Status::internal("internal error"),
        }
    }
}

pub struct GrpcAuth {
    state: Arc<AppState>,
}

impl GrpcAuth {
    pub fn new(state: Arc<AppState>) -> Self {
        Self { state }
    }

    pub fn into_server(self) -> AuthServer<GrpcAuth> {
        AuthServer::new(self)
    }
}

#[tonic::async_trait]
impl Auth for GrpcAuth {
    async fn sign_up(
        &self,
        request: Request<proto::SignUpRequest>,
    ) -> Result<Response<proto::SignUpResponse>, Status> {
        let req = request.into_inner();
        let id = self.state.service.register(&req.email, &req.password).await?;
        Ok(Response::new(proto::SignUpResponse { id }))
    }

    async fn login(
        &self,
        request: Request<proto::LoginRequest>,
    ) -> Result<Response<proto::LoginResponse>, Status> {
        let req = request.into_inner();
        let pair = self
            .state
            .service
            .authenticate(&req.email, &req.password)
            .await?;
        Ok(Response::new(proto::LoginResponse {
            access: pair.access,
            refresh: pair.refresh,
        }))
    }

    async fn refresh(
        &self,
        request: Request<proto::RefreshRequest>,
    ) -> Result<Response<proto::RefreshResponse>, Status> {
        let req = request.into_inner();
        let access = self.state.service.renew(&req.token).await?;
        Ok(Response::new(proto::RefreshResponse { access }))
    }

    async fn logout(
        &self,
        request: Request<proto::LogoutRequest>,
    ) -> Result<Response<proto::LogoutResponse>, Status> {
        let req = request.into_inner();
        self.state.service.revoke(&req.token).await?;
        Ok(Response::new(proto::LogoutResponse {
            status: "ok".to_string(),
        }))
    }

    async fn introspect(
        &self,
        request: Request<proto::IntrospectRequest>,
    ) -> Result<Response<proto::IntrospectResponse>, Status> {
        let req = request.into_inner();
        let resp = match self.state.service.authorize(req.token.trim()).await {
            Ok(user_id) => proto::IntrospectResponse {
                active: true,
                user_id,
            },
            Err(AppError::InvalidToken) => proto::IntrospectResponse {
                active: false,
                user_id: 0,
            },
            Err(e) => return Err(e.into()),
        };
        Ok(Response::new(resp))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testutil::test_service;
    use tonic::Code;

    fn grpc() -> GrpcAuth {
        GrpcAuth::new(Arc::new(AppState {
            service: test_service(),
        }))
    }

    #[tokio::test]
    async fn full_lifecycle_over_rpc() {
        let svc = grpc();

        let id = svc
            .sign_up(Request::new(proto::SignUpRequest {
                email: "a@x.com".into(),
                password: "password1".into(),
            }))
            .await
            .unwrap()
            .into_inner()
            .id;

        let tokens = svc
            .login(Request::new(proto::LoginRequest {
                email: "a@x.com".into(),
                password: "password1".into(),
            }))
            .await
            .unwrap()
            .into_inner();

        let renewed = svc
            .refresh(Request::new(proto::RefreshRequest {
                token: tokens.refresh.clone(),
            }))
            .await
            .unwrap()
            .into_inner();
        assert_ne!(renewed.access, tokens.access);

        let check = svc
            .introspect(Request::new(proto::IntrospectRequest {
                token: tokens.access.clone(),
            }))
            .await
            .unwrap()
            .into_inner();
        assert!(check.active);
        assert_eq!(check.user_id, id);

        let out = svc
            .logout(Request::new(proto::LogoutRequest {
                token: tokens.access.clone(),
            }))
            .await
            .unwrap()
            .into_inner();
        assert_eq!(out.status, "ok");

        let check = svc
            .introspect(Request::new(proto::IntrospectRequest {
                token: tokens.access,
            }))
            .await
            .unwrap()
            .into_inner();
        assert!(!check.active);
    }

    #[tokio::test]
    async fn wrong_credentials_are_unauthenticated() {
        let svc = grpc();
        svc.sign_up(Request::new(proto::SignUpRequest {
            email: "a@x.com".into(),
            password: "password1".into(),
        }))
        .await
        .unwrap();

        let err = svc
            .login(Request::new(proto::LoginRequest {
                email: "a@x.com".into(),
                password: "password2".into(),
            }))
            .await
            .unwrap_err();
        assert_eq!(err.code(), Code::Unauthenticated);
    }

    #[tokio::test]
    async fn duplicate_sign_up_already_exists() {
        let svc = grpc();
        let req = proto::SignUpRequest {
            email: "a@x.com".into(),
            password: "password1".into(),
        };
        svc.sign_up(Request::new(req.clone())).await.unwrap();

        let err = svc.sign_up(Request::new(req)).await.unwrap_err();
        assert_eq!(err.code(), Code::AlreadyExists);
    }

    #[tokio::test]
    async fn unknown_refresh_token_is_unauthenticated() {
        let svc = grpc();
        let err = svc
            .refresh(Request::new(proto::RefreshRequest {
                token: "bogus".into(),
            }))
            .await
            .unwrap_err();
        assert_eq!(err.code(), Code::Unauthenticated);
    }
}
