pub mod authorize;
pub mod request_id;

pub use authorize::{
    authorize_middleware, normalize_path, AuthorizationDecision, CurrentUser, Redirect, RedirectPaths,
    RequestAuthorizer, RequestContext,
};
pub use request_id::{request_id_middleware, RequestId, REQUEST_ID_HEADER};
