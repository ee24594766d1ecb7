/// Liveness greeting
///
/// GET /hello
pub async fn hello() -> &'static str {
    "Hello!"
}
