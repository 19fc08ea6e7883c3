//! Route file template

/// Registry name of [`ENTITY`]
pub const ENTITY_NAME: &str = "routes/entity";

/// Per-entity route file, loaded by the aggregate `routes/api.php`
pub const ENTITY: &str = r"<?php

use App\Http\Controllers\{{ entity.class }}Controller;
use Illuminate\Support\Facades\Route;

Route::middleware([{{ middleware }}])->prefix('{{ prefix }}')->group(function () {
{% for route in public_routes %}
    Route::{{ route.verb }}('{{ route.uri }}', [{{ entity.class }}Controller::class, '{{ route.action }}']);
{% endfor %}
{% if public_routes and auth_routes %}

{% endif %}
{% if auth_routes %}
    Route::middleware(['{{ auth_middleware }}'])->group(function () {
{% for route in auth_routes %}
        Route::{{ route.verb }}('{{ route.uri }}', [{{ entity.class }}Controller::class, '{{ route.action }}']);
{% endfor %}
    });
{% endif %}
});
";
