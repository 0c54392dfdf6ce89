//! 目录客户端命令行入口
//!
//! 子命令对应原系统的页面：list（列表页）、add（新增页）、
//! edit（编辑页）、delete（列表页的行内删除）。

use clap::{Parser, Subcommand};

use user_directory::app::users::model::User;
use user_directory::client::api::DirectoryClient;
use user_directory::client::form::UserForm;
use user_directory::client::pages::{AddPage, EditPage, EditStatus, ListPage};
use user_directory::infrastructure::config::client_api_url;
use user_directory::infrastructure::logger::Logger;

/// 用户目录客户端
#[derive(Parser)]
#[command(name = "directory-client", version)]
struct Cli {
    /// 目录服务地址，也可用环境变量 DIRECTORY_API_URL 指定
    #[arg(long)]
    api_url: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// 列出全部用户
    List,
    /// 新增用户
    Add {
        #[arg(long)]
        name: String,
        #[arg(long)]
        email: String,
        /// 年龄（文本形式，提交前解析）
        #[arg(long)]
        age: String,
        #[arg(long)]
        mobile: String,
        /// 逗号分隔的兴趣标签
        #[arg(long, default_value = "")]
        interests: String,
    },
    /// 编辑用户：先加载现有记录，再用给出的字段覆盖表单后提交
    Edit {
        id: String,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        email: Option<String>,
        #[arg(long)]
        age: Option<String>,
        #[arg(long)]
        mobile: Option<String>,
        #[arg(long)]
        interests: Option<String>,
    },
    /// 删除用户
    Delete { id: String },
}

#[tokio::main]
async fn main() {
    Logger::init();
    let cli = Cli::parse();

    let base_url = cli.api_url.unwrap_or_else(client_api_url);
    let client = DirectoryClient::new(base_url);

    let exit_code = match cli.command {
        Command::List => run_list(&client).await,
        Command::Add {
            name,
            email,
            age,
            mobile,
            interests,
        } => {
            let form = UserForm {
                name,
                email,
                age,
                mobile,
                interests,
            };
            run_add(&client, form).await
        }
        Command::Edit {
            id,
            name,
            email,
            age,
            mobile,
            interests,
        } => run_edit(&client, id, name, email, age, mobile, interests).await,
        Command::Delete { id } => run_delete(&client, &id).await,
    };

    std::process::exit(exit_code);
}

async fn run_list(client: &DirectoryClient) -> i32 {
    match ListPage::load(client).await {
        Ok(page) => {
            render_users(page.users());
            0
        }
        Err(err) => {
            eprintln!("Error fetching users: {}", err);
            1
        }
    }
}

async fn run_add(client: &DirectoryClient, form: UserForm) -> i32 {
    let mut page = AddPage::new();
    page.form = form;

    let created = page.submit(client).await;
    if let Some(message) = page.message() {
        println!("{}", message);
    }
    match created {
        Some(user) => {
            println!("id: {}", user.id);
            0
        }
        None => 1,
    }
}

async fn run_edit(
    client: &DirectoryClient,
    id: String,
    name: Option<String>,
    email: Option<String>,
    age: Option<String>,
    mobile: Option<String>,
    interests: Option<String>,
) -> i32 {
    let mut page = EditPage::new(id);

    page.load(client).await;
    if page.status() == EditStatus::Error {
        eprintln!(
            "{}",
            page.error_message().unwrap_or("Failed to fetch user data.")
        );
        return 1;
    }
    println!("Editing {}", page.loaded_name());

    // 命令行给出的字段覆盖表单草稿，其余保持加载到的值
    if let Some(name) = name {
        page.form.name = name;
    }
    if let Some(email) = email {
        page.form.email = email;
    }
    if let Some(age) = age {
        page.form.age = age;
    }
    if let Some(mobile) = mobile {
        page.form.mobile = mobile;
    }
    if let Some(interests) = interests {
        page.form.interests = interests;
    }

    page.submit(client).await;
    match page.status() {
        EditStatus::Submitted => {
            println!("User updated successfully!");
            0
        }
        _ => {
            eprintln!(
                "{}",
                page.error_message().unwrap_or("Failed to update user.")
            );
            1
        }
    }
}

async fn run_delete(client: &DirectoryClient, id: &str) -> i32 {
    let mut page = match ListPage::load(client).await {
        Ok(page) => page,
        Err(err) => {
            eprintln!("Error fetching users: {}", err);
            return 1;
        }
    };

    match page.delete(client, id).await {
        Ok(()) => {
            println!("User deleted successfully");
            println!("{} user(s) remaining", page.users().len());
            0
        }
        Err(err) => {
            eprintln!("Error deleting user: {}", err);
            1
        }
    }
}

fn render_users(users: &[User]) {
    if users.is_empty() {
        println!("(no users)");
        return;
    }

    println!(
        "{:<36} {:<16} {:<24} {:>4} {:<14} {}",
        "ID", "Name", "Email", "Age", "Mobile", "Interests"
    );
    for user in users {
        println!(
            "{:<36} {:<16} {:<24} {:>4} {:<14} {}",
            user.id,
            user.name,
            user.email,
            user.age,
            user.mobile,
            user.interests.join(", ")
        );
    }
}
