//! 客户端端到端测试：把目录服务起在随机端口上，用客户端页面流程驱动

use std::sync::Arc;

use user_directory::app::users::handler::{routes, AppState};
use user_directory::app::users::model::NewUser;
use user_directory::app::users::service::UserService;
use user_directory::app::users::store::MemoryStore;
use user_directory::client::api::{ClientError, DirectoryClient};
use user_directory::client::form::UserForm;
use user_directory::client::pages::{AddPage, EditPage, EditStatus, ListPage};

async fn spawn_server() -> DirectoryClient {
    let state = AppState {
        user_service: UserService::new(Arc::new(MemoryStore::new())),
    };
    let app = routes().with_state(state);

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    DirectoryClient::new(format!("http://{}", addr))
}

fn ann_form() -> UserForm {
    UserForm {
        name: "Ann".to_string(),
        email: "ann@x.com".to_string(),
        age: "30".to_string(),
        mobile: "555-1".to_string(),
        interests: String::new(),
    }
}

#[tokio::test]
async fn add_page_creates_user_and_clears_form() {
    let client = spawn_server().await;

    let mut page = AddPage::new();
    page.form = ann_form();

    let created = page.submit(&client).await.expect("创建应当成功");
    assert_eq!(created.name, "Ann");
    assert_eq!(created.age, 30);
    assert!(created.interests.is_empty());

    // 成功后表单清空并留下确认消息，不自动跳转
    assert_eq!(page.form, UserForm::default());
    assert_eq!(page.message(), Some("User added successfully!"));

    let users = client.fetch_users().await.unwrap();
    assert_eq!(users.len(), 1);
    assert_eq!(users[0].id, created.id);
}

#[tokio::test]
async fn add_page_blocks_non_numeric_age_before_request() {
    let client = spawn_server().await;

    let mut page = AddPage::new();
    page.form = ann_form();
    page.form.age = "thirty".to_string();

    assert!(page.submit(&client).await.is_none());
    assert_eq!(page.message(), Some("Error: Age must be a valid number."));
    // 请求没有发出，表单保留草稿
    assert_eq!(page.form.name, "Ann");
    assert!(client.fetch_users().await.unwrap().is_empty());
}

#[tokio::test]
async fn add_page_surfaces_server_message_on_failure() {
    let client = spawn_server().await;

    // 同邮箱创建两次，第二次失败并把服务端 message 带进提示
    let mut first = AddPage::new();
    first.form = ann_form();
    first.submit(&client).await.unwrap();

    let mut second = AddPage::new();
    second.form = ann_form();
    second.form.mobile = "555-9".to_string();
    assert!(second.submit(&client).await.is_none());
    assert_eq!(second.message(), Some("Error: Error creating user"));
    // 失败时草稿保留
    assert_eq!(second.form.name, "Ann");
}

#[tokio::test]
async fn interests_text_normalizes_end_to_end() {
    let client = spawn_server().await;

    let mut page = AddPage::new();
    page.form = ann_form();
    page.form.interests = "a, b ,  c".to_string();

    let created = page.submit(&client).await.unwrap();
    assert_eq!(created.interests, vec!["a", "b", "c"]);

    let fetched = client.fetch_user(&created.id.to_string()).await.unwrap();
    assert_eq!(fetched.interests, vec!["a", "b", "c"]);
}

#[tokio::test]
async fn edit_page_full_flow() {
    let client = spawn_server().await;

    let created = client
        .create_user(&NewUser {
            name: "Ann".to_string(),
            age: 30,
            mobile: "555-1".to_string(),
            email: "ann@x.com".to_string(),
            interests: vec!["a".to_string(), "b".to_string()],
        })
        .await
        .unwrap();

    let mut page = EditPage::new(created.id.to_string());
    assert_eq!(page.status(), EditStatus::Idle);

    // 加载后表单按文本填充：age 渲染回字符串，interests 用 ", " 连接
    page.load(&client).await;
    assert_eq!(page.status(), EditStatus::UserLoaded);
    assert!(page.fields_enabled());
    assert_eq!(page.loaded_name(), "Ann");
    assert_eq!(page.form.age, "30");
    assert_eq!(page.form.interests, "a, b");

    page.form.name = "Anne".to_string();
    page.form.age = "31".to_string();
    page.form.interests = "a, b, c".to_string();
    page.submit(&client).await;
    assert_eq!(page.status(), EditStatus::Submitted);
    assert!(page.error_message().is_none());

    let fetched = client.fetch_user(&created.id.to_string()).await.unwrap();
    assert_eq!(fetched.name, "Anne");
    assert_eq!(fetched.age, 31);
    assert_eq!(fetched.interests, vec!["a", "b", "c"]);
    assert_eq!(fetched.email, "ann@x.com");
}

#[tokio::test]
async fn edit_page_load_failure_enters_error_state() {
    let client = spawn_server().await;

    let mut page = EditPage::new("00000000-0000-0000-0000-000000000000");
    page.load(&client).await;

    assert_eq!(page.status(), EditStatus::Error);
    assert!(!page.fields_enabled());
    assert_eq!(
        page.error_message(),
        Some("Failed to fetch user data. The user might not exist or there was a network issue.")
    );
}

#[tokio::test]
async fn edit_page_submit_failure_returns_to_editable_state() {
    let client = spawn_server().await;

    let created = client
        .create_user(&NewUser {
            name: "Ann".to_string(),
            age: 30,
            mobile: "555-1".to_string(),
            email: "ann@x.com".to_string(),
            interests: vec![],
        })
        .await
        .unwrap();

    let mut page = EditPage::new(created.id.to_string());
    page.load(&client).await;

    // 服务端校验失败：退回 UserLoaded，显示服务端 message，可重试
    page.form.email = "nope".to_string();
    page.submit(&client).await;
    assert_eq!(page.status(), EditStatus::UserLoaded);
    assert!(page.fields_enabled());
    assert_eq!(page.error_message(), Some("Validation failed"));

    // 修正后重试成功
    page.form.email = "anne@x.com".to_string();
    page.submit(&client).await;
    assert_eq!(page.status(), EditStatus::Submitted);

    let fetched = client.fetch_user(&created.id.to_string()).await.unwrap();
    assert_eq!(fetched.email, "anne@x.com");
}

#[tokio::test]
async fn edit_page_blocks_non_numeric_age_and_keeps_record() {
    let client = spawn_server().await;

    let created = client
        .create_user(&NewUser {
            name: "Ann".to_string(),
            age: 30,
            mobile: "555-1".to_string(),
            email: "ann@x.com".to_string(),
            interests: vec![],
        })
        .await
        .unwrap();

    let mut page = EditPage::new(created.id.to_string());
    page.load(&client).await;

    page.form.name = "Anne".to_string();
    page.form.age = "abc".to_string();
    page.submit(&client).await;

    // 请求被拦下，仍然可编辑
    assert_eq!(page.status(), EditStatus::UserLoaded);
    assert_eq!(page.error_message(), Some("Age must be a valid number."));

    // 服务端记录原样未动
    let fetched = client.fetch_user(&created.id.to_string()).await.unwrap();
    assert_eq!(fetched.name, "Ann");
    assert_eq!(fetched.age, 30);
}

#[tokio::test]
async fn list_page_removes_row_only_after_server_delete() {
    let client = spawn_server().await;

    let ann = client
        .create_user(&NewUser {
            name: "Ann".to_string(),
            age: 30,
            mobile: "555-1".to_string(),
            email: "ann@x.com".to_string(),
            interests: vec![],
        })
        .await
        .unwrap();
    client
        .create_user(&NewUser {
            name: "Bob".to_string(),
            age: 41,
            mobile: "555-2".to_string(),
            email: "bob@x.com".to_string(),
            interests: vec![],
        })
        .await
        .unwrap();

    let mut page = ListPage::load(&client).await.unwrap();
    assert_eq!(page.users().len(), 2);

    let ann_id = ann.id.to_string();
    page.delete(&client, &ann_id).await.unwrap();
    assert_eq!(page.users().len(), 1);
    assert_eq!(page.users()[0].name, "Bob");

    // 再删同一行：服务端 404，本地状态不变
    let err = page.delete(&client, &ann_id).await.unwrap_err();
    match err {
        ClientError::Api { status, message } => {
            assert_eq!(status, 404);
            assert_eq!(message, "User not found");
        }
        other => panic!("意外的错误类型: {:?}", other),
    }
    assert_eq!(page.users().len(), 1);

    let remaining = client.fetch_users().await.unwrap();
    assert_eq!(remaining.len(), 1);
    assert_eq!(remaining[0].name, "Bob");
}
