//! Dependency-injection provider template

/// Registry name of [`PROVIDER`]
pub const PROVIDER_NAME: &str = "providers/provider";

/// Provider registry created on first use with its first binding
pub const PROVIDER: &str = r"<?php

namespace App\Providers;

use Illuminate\Support\ServiceProvider;

class {{ name }} extends ServiceProvider
{
    /**
     * Register services.
     */
    public function register(): void
    {
        {{ binding }}
    }

    /**
     * Bootstrap services.
     */
    public function boot(): void
    {
        //
    }
}
";
