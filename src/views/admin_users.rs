use askama::Template;

use crate::models::users::{
    entities::{User, UserType},
    requests::UserFormParams,
};

/// 用户列表行，空字段渲染为空字符串
pub struct UserRow {
    pub id: i64,
    pub user_name: String,
    pub email: String,
    pub id_number: String,
    pub user_type: &'static str,
    pub first_name: String,
    pub last_name: String,
}

impl From<User> for UserRow {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            user_name: user.user_name,
            email: user.email.unwrap_or_default(),
            id_number: user.id_number.unwrap_or_default(),
            user_type: user.user_type.as_str(),
            first_name: user.first_name,
            last_name: user.last_name,
        }
    }
}

#[derive(Template)]
#[template(path = "admin/users/index.html")]
pub struct UserIndexPage {
    pub users: Vec<UserRow>,
}

impl UserIndexPage {
    pub fn new(users: Vec<User>) -> Self {
        Self {
            users: users.into_iter().map(UserRow::from).collect(),
        }
    }
}

pub struct TypeOption {
    pub value: &'static str,
    pub selected: bool,
}

#[derive(Template)]
#[template(path = "admin/users/edit.html")]
pub struct UserEditPage {
    pub id: i64,
    pub user_name: String,
    pub email: String,
    pub id_number: String,
    pub first_name: String,
    pub last_name: String,
    pub type_options: Vec<TypeOption>,
    pub errors: Vec<String>,
}

impl UserEditPage {
    /// 用已保存的记录填充表单
    pub fn for_user(user: &User) -> Self {
        Self {
            id: user.id,
            user_name: user.user_name.clone(),
            email: user.email.clone().unwrap_or_default(),
            id_number: user.id_number.clone().unwrap_or_default(),
            first_name: user.first_name.clone(),
            last_name: user.last_name.clone(),
            type_options: type_options(user.user_type.as_str()),
            errors: Vec::new(),
        }
    }

    /// 校验失败时回显提交的值
    pub fn with_submitted(id: i64, form: &UserFormParams, errors: Vec<String>) -> Self {
        let value = |field: &Option<String>| field.clone().unwrap_or_default();
        Self {
            id,
            user_name: value(&form.user_name),
            email: value(&form.email),
            id_number: value(&form.id_number),
            first_name: value(&form.first_name),
            last_name: value(&form.last_name),
            type_options: type_options(form.user_type.as_deref().unwrap_or_default()),
            errors,
        }
    }
}

fn type_options(selected: &str) -> Vec<TypeOption> {
    UserType::all_types()
        .iter()
        .map(|t| TypeOption {
            value: t.as_str(),
            selected: t.as_str() == selected,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user() -> User {
        User {
            id: 7,
            user_name: "c5bennet".to_string(),
            email: None,
            id_number: Some("1122018".to_string()),
            user_type: UserType::EndUser,
            first_name: "Bennet".to_string(),
            last_name: "Clark".to_string(),
            password_hash: None,
            created_at: chrono::Utc::now(),
            updated_at: chrono::Utc::now(),
        }
    }

    #[test]
    fn test_edit_page_prefills_record() {
        let html = UserEditPage::for_user(&user()).render().unwrap();
        assert!(html.contains(r#"value="c5bennet""#));
        assert!(html.contains(r#"<option value="EndUser" selected>"#));
        assert!(!html.contains("error_explanation"));
    }

    #[test]
    fn test_edit_page_echoes_submitted_values_and_errors() {
        let form = UserFormParams {
            user_name: Some("<b>bad name</b>".to_string()),
            user_type: Some("SuperUser".to_string()),
            ..Default::default()
        };
        let errors = vec!["Type is not included in the list".to_string()];
        let page = UserEditPage::with_submitted(7, &form, errors);
        let html = page.render().unwrap();
        assert!(html.contains("error_explanation"));
        assert!(html.contains("Type is not included in the list"));
        assert!(html.contains("&lt;b&gt;bad name"));
        assert!(!html.contains("<b>bad name"));
        assert!(!html.contains(" selected>"));
    }

    #[test]
    fn test_index_lists_users() {
        let html = UserIndexPage::new(vec![user()]).render().unwrap();
        assert!(html.contains(r#"id="user_7""#));
        assert!(html.contains("/admin/users/7/edit"));
    }
}
