use axum::response::Html;

/// The single user-facing page: the reimbursement request form.
pub async fn form_page() -> Html<&'static str> {
    Html(include_str!("../../assets/form.html"))
}
