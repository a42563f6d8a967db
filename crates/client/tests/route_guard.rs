mod support;

use hrdesk_auth::{Identity, NavigationContext, UserRole};
use hrdesk_client::NavigationOutcome;
use hrdesk_core::UserId;
use support::{MockState, TestServer, user};

fn identity_with_raw_role(raw: &str) -> Identity {
    let mut identity = Identity::new(UserId::new("u-1").unwrap(), "u1@example.com", UserRole::Staff);
    identity.role_id = raw.to_string();
    identity
}

#[tokio::test]
async fn protected_route_without_session_goes_to_login() {
    let srv = TestServer::spawn().await;
    let (ctx, storage) = srv.context().await;

    let arrival = ctx.navigate("/admin/employees").await.unwrap();
    assert_eq!(arrival.path, "/login");
    assert_eq!(arrival.redirects, vec!["/login"]);
    assert!(!arrival.context.is_authenticated);
    assert_eq!(arrival.context.permissions, None);
    assert_eq!(MockState::hits(&srv.state.me_hits), 1);
    assert!(!storage.contains("user"));
}

#[tokio::test]
async fn login_page_sends_identities_to_their_home() {
    let srv = TestServer::spawn().await;
    let (ctx, _storage) = srv.context().await;

    let cases = [
        ("ADMIN", "/admin/dashboard"),
        ("manager", "/manager/dashboard"),
        ("STAFF", "/my/dashboard"),
        ("INTERN", "/my/dashboard"),
    ];
    for (raw_role, home) in cases {
        ctx.session()
            .set_auth(Some(identity_with_raw_role(raw_role)), None)
            .await
            .unwrap();

        let arrival = ctx.navigate("/login").await.unwrap();
        assert_eq!(arrival.path, home, "{raw_role}");
        assert_eq!(arrival.redirects, vec![home.to_string()], "{raw_role}");
        assert!(arrival.context.is_authenticated);
    }
    assert_eq!(MockState::hits(&srv.state.me_hits), 0);
}

#[tokio::test]
async fn single_evaluation_reports_the_redirect() {
    let srv = TestServer::spawn().await;
    let (ctx, _storage) = srv.context().await;
    ctx.session()
        .set_auth(Some(identity_with_raw_role("MANAGER")), None)
        .await
        .unwrap();

    let outcome = ctx.guard().evaluate("/").await;
    assert_eq!(
        outcome,
        NavigationOutcome::Redirect {
            from: "/".into(),
            to: "/manager/dashboard".into()
        }
    );
}

#[tokio::test]
async fn successful_refresh_renders_and_warms_lovs() {
    let srv = TestServer::spawn().await;
    srv.state.set_me(Some(user("m-1", "MANAGER")));
    let (ctx, storage) = srv.context().await;

    let arrival = ctx.navigate("/manager/leaves/").await.unwrap();
    assert_eq!(arrival.path, "/manager/leaves");
    assert!(arrival.redirects.is_empty());
    assert_eq!(arrival.context.role, Some(UserRole::Manager));
    let permissions = arrival.context.permissions.unwrap();
    assert!(permissions.can_approve.leaves);
    assert!(!permissions.can_view.payslip);
    assert_eq!(ctx.navigation().get(), NavigationContext::Manager);

    assert!(storage.contains("user"));
    assert_eq!(MockState::hits(&srv.state.lov_hits), 1);
    assert!(ctx.lovs().get("UserRole").is_some());
}

#[tokio::test]
async fn misrouted_identity_lands_on_its_home() {
    let srv = TestServer::spawn().await;
    srv.state.set_me(Some(user("s-1", "STAFF")));
    let (ctx, _storage) = srv.context().await;

    let arrival = ctx.navigate("/admin/employees").await.unwrap();
    assert_eq!(arrival.path, "/my/dashboard");
    assert_eq!(arrival.redirects, vec!["/my/dashboard"]);
    assert_eq!(ctx.navigation().get(), NavigationContext::Staff);

    let arrival = ctx.navigate("/manager/team").await.unwrap();
    assert_eq!(arrival.path, "/my/dashboard");
}

#[tokio::test]
async fn admin_may_enter_every_section() {
    let srv = TestServer::spawn().await;
    srv.state.set_me(Some(user("a-1", "ADMIN")));
    let (ctx, _storage) = srv.context().await;

    for (path, nav) in [
        ("/admin/employees", NavigationContext::Admin),
        ("/manager/leaves", NavigationContext::Manager),
        ("/my/leaves", NavigationContext::Staff),
    ] {
        let arrival = ctx.navigate(path).await.unwrap();
        assert_eq!(arrival.path, path);
        assert_eq!(arrival.context.navigation, Some(nav));
        assert_eq!(ctx.navigation().get(), nav);
    }
    assert_eq!(MockState::hits(&srv.state.me_hits), 1);
}

#[tokio::test]
async fn public_pages_render_without_a_session() {
    let srv = TestServer::spawn().await;
    let (ctx, _storage) = srv.context().await;

    for path in ["/", "/login", "/login?next=/my/leaves"] {
        let arrival = ctx.navigate(path).await.unwrap();
        assert!(arrival.redirects.is_empty(), "{path}");
        assert!(!arrival.context.is_authenticated);
    }
    assert_eq!(MockState::hits(&srv.state.me_hits), 0);
}

#[tokio::test]
async fn persisted_session_survives_restart() {
    let srv = TestServer::spawn().await;
    let (ctx, storage) = srv.context().await;
    ctx.session()
        .set_auth(Some(identity_with_raw_role("STAFF")), Some("tok".into()))
        .await
        .unwrap();
    drop(ctx);

    let restarted = srv.context_over(storage).await;
    assert_eq!(restarted.session().token().as_deref(), Some("tok"));

    let arrival = restarted.navigate("/my/dashboard").await.unwrap();
    assert_eq!(arrival.path, "/my/dashboard");
    assert_eq!(arrival.context.role, Some(UserRole::Staff));
    assert_eq!(MockState::hits(&srv.state.me_hits), 0);
}

#[tokio::test]
async fn expired_server_session_is_cleared_on_refresh() {
    let srv = TestServer::spawn().await;
    let (ctx, storage) = srv.context().await;
    // No local identity, but a stale token left behind.
    storage_with_token(&storage).await;

    let arrival = ctx.navigate("/my/leaves").await.unwrap();
    assert_eq!(arrival.path, "/login");
    assert!(!storage.contains("token"));
}

async fn storage_with_token(storage: &hrdesk_client::MemoryStorage) {
    use hrdesk_client::DurableStorage;
    storage.set("token", "stale").await.unwrap();
}

#[tokio::test]
async fn unreachable_server_during_refresh_fails_closed() {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let storage = hrdesk_client::MemoryStorage::new();
    storage_with_token(&storage).await;
    let config = hrdesk_client::ClientConfig::new(format!("http://{addr}"))
        .with_warm_lov_types(vec!["UserRole".to_string()]);
    let ctx = hrdesk_client::AppContext::with_storage(config, std::sync::Arc::new(storage.clone()))
        .await
        .unwrap();

    let arrival = ctx.navigate("/manager/leaves").await.unwrap();
    assert_eq!(arrival.path, "/login");
    assert_eq!(arrival.redirects, vec!["/login"]);
    assert!(!arrival.context.is_authenticated);
    assert!(!ctx.session().is_authenticated());
    assert!(!storage.contains("token"));
    assert_eq!(ctx.lovs().get("UserRole"), None);
}
