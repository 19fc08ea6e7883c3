//! Verbatim support files and composition-root blocks
//!
//! Nothing here is rendered; the files are written as-is when absent.

/// `app/Traits/ResponseTrait.php`
pub const RESPONSE_TRAIT: &str = r"<?php

namespace App\Traits;

use Illuminate\Http\JsonResponse;
use Illuminate\Http\Resources\Json\AnonymousResourceCollection;
use Illuminate\Pagination\AbstractPaginator;
use Illuminate\Support\Facades\Response;

trait ResponseTrait
{
    public function success($message, $code): JsonResponse
    {
        return Response::json([
            'status' => 'success',
            'code' => $code,
            'message' => $message,
        ], $code);
    }

    public function returnData($message, $code, $value): JsonResponse
    {
        return Response::json([
            'status' => 'success',
            'code' => $code,
            'message' => $message,
            'data' => $value,
        ], $code);
    }

    public function returnError($message, $code): JsonResponse
    {
        return Response::json([
            'status' => 'error',
            'code' => $code,
            'message' => $message,
        ], $code);
    }

    public function returnDataWithPagination($message, $code, $data): JsonResponse
    {
        $pagination = null;
        if ($data instanceof AnonymousResourceCollection && $data->resource instanceof AbstractPaginator) {
            $paginator = $data->resource;
            $pagination = [
                'total' => $paginator->total(),
                'per_page' => $paginator->perPage(),
                'current_page' => $paginator->currentPage(),
                'last_page' => $paginator->lastPage(),
                'from' => $paginator->firstItem(),
                'to' => $paginator->lastItem(),
            ];
        }

        return Response::json([
            'status' => 'success',
            'code' => $code,
            'message' => $message,
            'data' => $data->resolve(),
            'pagination' => $pagination,
        ], $code);
    }
}
";

/// `app/Traits/ImageTrait.php`
pub const IMAGE_TRAIT: &str = r"<?php

namespace App\Traits;

use Illuminate\Support\Facades\Storage;

trait ImageTrait
{
    public function saveImage($request, string $field, string $directory): ?string
    {
        if (! $request->hasFile($field)) {
            return null;
        }

        return $request->file($field)->store($directory, 'public');
    }

    public function updateImage($request, string $field, string $directory, ?string $current): ?string
    {
        if (! $request->hasFile($field)) {
            return $current;
        }

        $this->deleteImage($current);

        return $this->saveImage($request, $field, $directory);
    }

    public function deleteImage(?string $path): void
    {
        if ($path && Storage::disk('public')->exists($path)) {
            Storage::disk('public')->delete($path);
        }
    }
}
";

/// `app/Traits/HasTimezoneConversion.php`
///
/// Opt-in model trait presenting dates in the zone sent in the `timezone`
/// request header.
pub const TIMEZONE_TRAIT: &str = r"<?php

namespace App\Traits;

use Carbon\Carbon;
use DateTimeInterface;
use DateTimeZone;

trait HasTimezoneConversion
{
    private function requestTimezone(): string
    {
        $timezone = request()->header('timezone');

        try {
            new DateTimeZone((string) $timezone);
            return (string) $timezone;
        } catch (\Exception $e) {
            return config('app.timezone');
        }
    }

    private function toRequestTimezone($value): ?string
    {
        if (!$value) {
            return null;
        }

        try {
            return Carbon::parse($value)
                ->setTimezone($this->requestTimezone())
                ->format('Y-m-d H:i:s');
        } catch (\Exception $e) {
            return (string) $value;
        }
    }

    protected function serializeDate(DateTimeInterface $date): ?string
    {
        return $this->toRequestTimezone($date);
    }

    public function getAttribute($key)
    {
        $value = parent::getAttribute($key);
        $cast = $this->casts[$key] ?? null;

        if ($value instanceof DateTimeInterface || in_array($cast, ['date', 'datetime'], true)) {
            return $this->toRequestTimezone($value);
        }

        return $value;
    }
}
";

/// `app/Http/Middleware/Cors.php`
pub const CORS_MIDDLEWARE: &str = r"<?php

namespace App\Http\Middleware;

use Closure;
use Illuminate\Http\Request;
use Symfony\Component\HttpFoundation\Response;

class Cors
{
    public function handle(Request $request, Closure $next): Response
    {
        if ($request->isMethod('OPTIONS')) {
            $response = response('', 204);
        } else {
            $response = $next($request);
        }

        $response->headers->set('Access-Control-Allow-Origin', '*');
        $response->headers->set('Access-Control-Allow-Methods', 'GET, POST, PUT, PATCH, DELETE, OPTIONS');
        $response->headers->set('Access-Control-Allow-Headers', 'Content-Type, Authorization, X-Requested-With, lang');

        return $response;
    }
}
";

/// `app/Http/Middleware/Lang.php`
pub const LANG_MIDDLEWARE: &str = r"<?php

namespace App\Http\Middleware;

use Closure;
use Illuminate\Http\Request;
use Illuminate\Support\Facades\App;
use Symfony\Component\HttpFoundation\Response;

class Lang
{
    public function handle(Request $request, Closure $next): Response
    {
        $locale = $request->header('lang', $request->getPreferredLanguage() ?? config('app.locale'));
        App::setLocale(substr((string) $locale, 0, 2));

        return $next($request);
    }
}
";

/// `app/Helpers/Routes/v1/RouteHelper.php`
pub const ROUTE_HELPER: &str = r"<?php

namespace App\Helpers\Routes\v1;

use RecursiveDirectoryIterator;
use RecursiveIteratorIterator;

class RouteHelper
{
    public static function includeRouteFiles(string $folder): void
    {
        if (! is_dir($folder)) {
            return;
        }

        $iterator = new RecursiveIteratorIterator(new RecursiveDirectoryIterator($folder));

        foreach ($iterator as $file) {
            if ($file->isFile() && $file->getExtension() === 'php') {
                require $file->getPathname();
            }
        }
    }
}
";

/// Initial `routes/api.php`
pub const API_ROUTES: &str = "<?php\n";

/// Line appended to `routes/api.php` to load every file in `routes/api/`
pub const ROUTE_INCLUDE: &str =
    "\n\\App\\Helpers\\Routes\\v1\\RouteHelper::includeRouteFiles(__DIR__ . '/api/');\n";

/// Marker proving [`ROUTE_INCLUDE`] is present
pub const ROUTE_INCLUDE_MARKER: &str = "RouteHelper::includeRouteFiles";

/// Imports the composition-root blocks depend on
pub const BOOTSTRAP_IMPORTS: [&str; 4] = [
    "use Illuminate\\Foundation\\Application;",
    "use Illuminate\\Foundation\\Configuration\\Exceptions;",
    "use Illuminate\\Foundation\\Configuration\\Middleware;",
    "use Illuminate\\Http\\Request;",
];

/// Marker: API routes are wired
pub const ROUTING_MARKER: &str = "api: __DIR__.'/../routes/api.php'";

/// Marker: `cors` middleware alias is registered
pub const CORS_MARKER: &str = "'cors' => App\\Http\\Middleware\\Cors::class";

/// Marker: `throttle` middleware alias is registered
pub const THROTTLE_MARKER: &str =
    "'throttle' => Illuminate\\Routing\\Middleware\\ThrottleRequests::class";

/// `->withRouting(...)` block
pub const ROUTING_BLOCK: &str = r"    ->withRouting(
        web: __DIR__.'/../routes/web.php',
        api: __DIR__.'/../routes/api.php',
        commands: __DIR__.'/../routes/console.php',
        health: '/up',
    )";

/// `->withMiddleware(...)` block
pub const MIDDLEWARE_BLOCK: &str = r"    ->withMiddleware(function (Middleware $middleware) {
        $middleware->alias([
            'lang' => App\Http\Middleware\Lang::class,
            'cors' => App\Http\Middleware\Cors::class,
            'throttle' => Illuminate\Routing\Middleware\ThrottleRequests::class,
        ]);
    })";

/// `->withExceptions(...)` block
pub const EXCEPTIONS_BLOCK: &str = r#"    ->withExceptions(function (Exceptions $exceptions) {
        $exceptions->render(function (Throwable $e, Request $request) {
            if ($request->is('api/*')) {
                if ($e->getMessage() === "Route [login] not defined.") {
                    return response()->json([
                        'error' => [
                            'message' => 'Unauthenticated.',
                            'status_code' => 401,
                        ],
                    ], 401);
                }

                $statusCode = method_exists($e, 'getStatusCode') ? $e->getStatusCode() : 422;

                return response()->json([
                    'error' => [
                        'message' => $e->getMessage(),
                        'status_code' => $statusCode,
                    ],
                ], $statusCode);
            }
        });
    })"#;
