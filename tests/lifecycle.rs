//! Lifecycle sequence tests for the scope interceptor.
//!
//! Every scenario is driven through the callback protocol surfaces the
//! way a host dispatch framework would: start, post-dispatch, zero or
//! more timeout/error hooks, then exactly one completion.

mod common;

use std::sync::Arc;

use request_scope::interceptor::{
    DeferredProcessingInterceptor, HandleResult, TaskProcessingInterceptor,
};
use request_scope::{
    LocalRegistry, RegistryKey, RequestContext, ResourceRegistry, ScopeError, ScopeInterceptor,
    ScopePolicy, ScopedResource,
};

use common::MockResource;

struct Fixture {
    registry: Arc<LocalRegistry>,
    key: RegistryKey,
    resource: Arc<MockResource>,
    interceptor: ScopeInterceptor,
    ctx: RequestContext,
}

fn fixture() -> Fixture {
    fixture_with_policy(ScopePolicy::default())
}

fn fixture_with_policy(policy: ScopePolicy) -> Fixture {
    let registry = Arc::new(LocalRegistry::new());
    let key = RegistryKey::new("session");
    let resource = MockResource::new();
    let interceptor = ScopeInterceptor::with_policy(
        registry.clone(),
        key.clone(),
        resource.clone(),
        policy,
    );
    Fixture {
        registry,
        key,
        resource,
        interceptor,
        ctx: RequestContext::new(),
    }
}

#[test]
fn normal_completion_never_closes() {
    let f = fixture();
    let task = f.interceptor.task_surface::<()>();

    task.pre_process(&f.ctx).unwrap();
    assert!(f.registry.lookup(&f.key).is_some());

    task.post_process(&f.ctx, None).unwrap();
    assert!(f.registry.lookup(&f.key).is_none(), "unbound after dispatch");

    task.after_completion(&f.ctx).unwrap();
    assert_eq!(f.resource.close_count(), 0);
    assert!(f.resource.is_open());
}

#[test]
fn start_directly_to_completion_never_closes() {
    let f = fixture();
    let task = f.interceptor.task_surface::<()>();

    task.pre_process(&f.ctx).unwrap();
    task.after_completion(&f.ctx).unwrap();
    assert_eq!(f.resource.close_count(), 0);
}

#[test]
fn timeout_then_completion_closes_exactly_once() {
    let f = fixture();
    let task = f.interceptor.task_surface::<()>();

    task.pre_process(&f.ctx).unwrap();
    task.post_process(&f.ctx, None).unwrap();

    let outcome = task.handle_timeout(&f.ctx);
    assert_eq!(outcome, HandleResult::NotHandled, "sentinel is non-exclusive");

    task.after_completion(&f.ctx).unwrap();
    assert_eq!(f.resource.close_count(), 1);
    assert!(!f.resource.is_open());
}

#[test]
fn error_then_completion_closes_exactly_once() {
    let f = fixture();
    let task = f.interceptor.task_surface::<()>();

    task.pre_process(&f.ctx).unwrap();
    task.post_process(&f.ctx, None).unwrap();

    let err: request_scope::BoxError = "boom".into();
    assert_eq!(task.handle_error(&f.ctx, &err), HandleResult::NotHandled);

    task.after_completion(&f.ctx).unwrap();
    assert_eq!(f.resource.close_count(), 1);
}

#[test]
fn timeout_and_error_together_close_once() {
    let f = fixture();
    let task = f.interceptor.task_surface::<()>();

    task.pre_process(&f.ctx).unwrap();
    task.post_process(&f.ctx, None).unwrap();

    task.handle_timeout(&f.ctx);
    let err: request_scope::BoxError = "boom".into();
    task.handle_error(&f.ctx, &err);

    task.after_completion(&f.ctx).unwrap();
    assert_eq!(f.resource.close_count(), 1, "one close, not two");
}

#[test]
fn post_dispatch_unbinds_independent_of_flags() {
    let f = fixture();
    let task = f.interceptor.task_surface::<()>();

    task.pre_process(&f.ctx).unwrap();
    task.handle_timeout(&f.ctx);

    task.post_process(&f.ctx, None).unwrap();
    assert!(f.registry.lookup(&f.key).is_none());

    task.after_completion(&f.ctx).unwrap();
    assert_eq!(f.resource.close_count(), 1);
}

#[test]
fn second_start_resets_flags() {
    let f = fixture();
    let task = f.interceptor.task_surface::<()>();

    task.pre_process(&f.ctx).unwrap();
    task.handle_timeout(&f.ctx);

    // New attempt for the same request: binding is idempotent and the
    // flags go back to false.
    task.pre_process(&f.ctx).unwrap();
    assert!(f.registry.lookup(&f.key).is_some());

    task.post_process(&f.ctx, None).unwrap();
    task.after_completion(&f.ctx).unwrap();
    assert_eq!(f.resource.close_count(), 0);
    assert!(f.resource.is_open());
}

#[test]
fn deferred_surface_uses_boolean_sentinel() {
    let f = fixture();
    let deferred = f.interceptor.deferred_surface::<()>();

    deferred.pre_process(&f.ctx).unwrap();
    deferred.post_process(&f.ctx, None).unwrap();

    assert!(deferred.handle_timeout(&f.ctx), "true keeps the event visible");

    deferred.after_completion(&f.ctx).unwrap();
    assert_eq!(f.resource.close_count(), 1);
}

#[test]
fn deferred_normal_completion_never_closes() {
    let f = fixture();
    let deferred = f.interceptor.deferred_surface::<()>();

    deferred.pre_process(&f.ctx).unwrap();
    assert!(f.registry.lookup(&f.key).is_some());

    deferred.post_process(&f.ctx, None).unwrap();
    assert!(f.registry.lookup(&f.key).is_none());

    deferred.after_completion(&f.ctx).unwrap();
    assert_eq!(f.resource.close_count(), 0);
}

#[test]
fn deferred_error_closes_exactly_once() {
    let f = fixture();
    let deferred = f.interceptor.deferred_surface::<()>();

    deferred.pre_process(&f.ctx).unwrap();
    deferred.post_process(&f.ctx, None).unwrap();

    let err: request_scope::BoxError = "boom".into();
    assert!(deferred.handle_error(&f.ctx, &err));

    deferred.after_completion(&f.ctx).unwrap();
    assert_eq!(f.resource.close_count(), 1);
}

#[test]
fn both_surfaces_share_one_state() {
    let f = fixture();
    let task = f.interceptor.task_surface::<()>();
    let deferred = f.interceptor.deferred_surface::<()>();

    task.pre_process(&f.ctx).unwrap();
    task.post_process(&f.ctx, None).unwrap();

    // Timeout recorded through one protocol shape...
    task.handle_timeout(&f.ctx);

    // ...closes the resource when completion arrives through the other.
    deferred.after_completion(&f.ctx).unwrap();
    assert_eq!(f.resource.close_count(), 1);
}

#[test]
fn close_failure_propagates_from_completion() {
    let f = fixture();
    let task = f.interceptor.task_surface::<()>();

    task.pre_process(&f.ctx).unwrap();
    task.post_process(&f.ctx, None).unwrap();
    task.handle_timeout(&f.ctx);

    f.resource.fail_next_close();
    let err = task.after_completion(&f.ctx).unwrap_err();
    assert!(matches!(err, ScopeError::Resource(_)));
    assert_eq!(f.resource.close_count(), 0);
}

#[test]
fn policy_can_leave_timed_out_resource_open() {
    let f = fixture_with_policy(ScopePolicy {
        close_on_timeout: false,
        close_on_error: true,
    });
    let task = f.interceptor.task_surface::<()>();

    task.pre_process(&f.ctx).unwrap();
    task.post_process(&f.ctx, None).unwrap();
    task.handle_timeout(&f.ctx);

    task.after_completion(&f.ctx).unwrap();
    assert_eq!(f.resource.close_count(), 0);
    assert!(f.resource.is_open());
}

#[test]
fn bound_resource_is_discoverable_while_bound() {
    let f = fixture();
    let task = f.interceptor.task_surface::<()>();

    task.pre_process(&f.ctx).unwrap();
    let bound = f.registry.lookup(&f.key).unwrap();
    let resource: Arc<dyn request_scope::ScopedResource> = f.resource.clone();
    assert!(Arc::ptr_eq(&bound, &resource));
}
