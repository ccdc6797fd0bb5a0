use clap::Args;
use skillorbit::courses::CourseId;
use skillorbit_app::context::AppContext;

#[derive(Debug, Args)]
pub(crate) struct EnrollArgs {
    /// Account email
    #[arg(long)]
    email: String,

    /// Account password
    #[arg(long, env = "SKILLORBIT_PASSWORD", hide_env_values = true)]
    password: String,

    /// Course id to enroll in
    #[arg(long)]
    course: String,
}

pub(crate) async fn run(context: &AppContext, args: EnrollArgs) -> Result<(), String> {
    let storefront = &context.storefront;

    let user = storefront
        .sign_in(&args.email, &args.password)
        .await
        .into_result()
        .map_err(|error| format!("failed to sign in: {error}"))?;

    let course_id = CourseId::from(args.course);

    if storefront.get_course(&course_id).await.is_none() {
        return Err(format!("course {course_id} not found"));
    }

    let order_id = storefront
        .enroll(&user.uid, &course_id)
        .await
        .into_result()
        .map_err(|error| format!("failed to enroll: {error}"))?;

    println!("enrolled {} in course {course_id} (order {order_id})", user.uid);

    for course in storefront.get_user_courses(&user.uid).await {
        println!("  {} {}", course.id, course.title);
    }

    Ok(())
}
