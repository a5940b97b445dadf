mod common;

use common::TestApp;

#[tokio::test]
async fn ping_works() {
    let app = TestApp::spawn().await;

    let (status, body) = app.get_json("/ping").await;

    assert_eq!(200, status.as_u16());
    assert_eq!(body["message"], "API OK");
}
