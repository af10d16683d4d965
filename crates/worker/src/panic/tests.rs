use super::join_error_panic_message;

#[tokio::test]
async fn blocking_panic_with_literal_payload() {
	let handle = tokio::task::spawn_blocking(|| panic!("unit exploded"));
	let err = handle.await.unwrap_err();
	let msg = join_error_panic_message(err).expect("should be a panic");
	assert!(msg.contains("unit exploded"), "unexpected payload: {msg}");
}

#[tokio::test]
async fn blocking_panic_with_formatted_payload() {
	let handle = tokio::task::spawn_blocking(|| panic!("unit {} exploded", 7));
	let err = handle.await.unwrap_err();
	let msg = join_error_panic_message(err).expect("should be a panic");
	assert_eq!(msg, "unit 7 exploded");
}

#[tokio::test]
async fn aborted_task_has_no_message() {
	let handle = tokio::spawn(async {
		tokio::time::sleep(std::time::Duration::from_secs(60)).await;
	});
	handle.abort();
	let err = handle.await.unwrap_err();
	assert!(join_error_panic_message(err).is_none());
}
